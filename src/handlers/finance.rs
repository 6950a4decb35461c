// src/handlers/finance.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::finance::{DespesaPayload, ReceitaPayload},
};

// ---
// Despesas
// ---

pub async fn listar_despesas(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let despesas = app_state.finance_repo.get_all_despesas().await?;
    Ok((StatusCode::OK, Json(despesas)))
}

pub async fn listar_despesas_do_usuario(
    State(app_state): State<AppState>,
    Path(usuario_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let despesas = app_state
        .finance_repo
        .get_despesas_do_usuario(usuario_id)
        .await?;
    Ok((StatusCode::OK, Json(despesas)))
}

pub async fn criar_despesa(
    State(app_state): State<AppState>,
    Json(payload): Json<DespesaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let despesa = app_state
        .finance_repo
        .create_despesa(
            &payload.descricao,
            payload.valor,
            payload.categoria.as_deref(),
            payload.anexo.as_deref(),
            payload.data,
            payload.usuario_id,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(despesa)))
}

pub async fn atualizar_despesa(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<DespesaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let despesa = app_state
        .finance_repo
        .update_despesa(
            id,
            &payload.descricao,
            payload.valor,
            payload.categoria.as_deref(),
            payload.anexo.as_deref(),
            payload.data,
            payload.usuario_id,
        )
        .await?;
    Ok((StatusCode::OK, Json(despesa)))
}

pub async fn excluir_despesa(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.finance_repo.delete_despesa(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---
// Receitas
// ---

pub async fn listar_receitas(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let receitas = app_state.finance_repo.get_all_receitas().await?;
    Ok((StatusCode::OK, Json(receitas)))
}

pub async fn buscar_receita(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let receita = app_state.finance_service.buscar_receita(&id).await?;
    Ok((StatusCode::OK, Json(receita)))
}

pub async fn criar_receita(
    State(app_state): State<AppState>,
    Json(payload): Json<ReceitaPayload>,
) -> Result<impl IntoResponse, AppError> {
    // `validate()` já cobre os itens, via validação aninhada do payload.
    payload.validate().map_err(AppError::ValidationError)?;

    let receita = app_state
        .finance_service
        .criar_receita(
            &payload.descricao,
            payload.valor,
            &payload.categoria,
            payload.anexo.as_deref(),
            payload.tag_id,
            payload.cliente_id,
            payload.usuario_id,
            &payload.itens,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(receita)))
}

/// Atualiza apenas os campos escalares da receita; os itens são imutáveis.
pub async fn atualizar_receita(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ReceitaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let receita = app_state
        .finance_repo
        .update_receita(
            id,
            &payload.descricao,
            payload.valor,
            &payload.categoria,
            payload.anexo.as_deref(),
            payload.tag_id,
            payload.cliente_id,
            payload.usuario_id,
        )
        .await?;
    Ok((StatusCode::OK, Json(receita)))
}

/// Exclui a receita devolvendo o estoque consumido pelos itens.
/// O id chega cru (String): a validação numérica é parte do contrato
/// da operação, que falha com INVALID_ARGUMENT antes de tocar no banco.
pub async fn excluir_receita(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.finance_service.excluir_receita(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
