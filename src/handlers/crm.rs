// src/handlers/crm.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::crm::{ClientePayload, FornecedorPayload, TagPayload},
};

// ---
// Clientes
// ---

pub async fn listar_clientes(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let clientes = app_state.crm_repo.get_all_clientes().await?;
    Ok((StatusCode::OK, Json(clientes)))
}

pub async fn criar_cliente(
    State(app_state): State<AppState>,
    Json(payload): Json<ClientePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let cliente = app_state
        .crm_repo
        .create_cliente(
            &payload.nome,
            &payload.notas,
            &payload.endereco,
            payload.tag_id,
            payload.usuario_id,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(cliente)))
}

pub async fn atualizar_cliente(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ClientePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let cliente = app_state
        .crm_repo
        .update_cliente(
            id,
            &payload.nome,
            &payload.notas,
            &payload.endereco,
            payload.tag_id,
            payload.usuario_id,
        )
        .await?;
    Ok((StatusCode::OK, Json(cliente)))
}

pub async fn excluir_cliente(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.crm_repo.delete_cliente(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---
// Fornecedores
// ---

pub async fn listar_fornecedores(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let fornecedores = app_state.crm_repo.get_all_fornecedores().await?;
    Ok((StatusCode::OK, Json(fornecedores)))
}

pub async fn criar_fornecedor(
    State(app_state): State<AppState>,
    Json(payload): Json<FornecedorPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let fornecedor = app_state.crm_repo.create_fornecedor(&payload.nome).await?;
    Ok((StatusCode::CREATED, Json(fornecedor)))
}

pub async fn atualizar_fornecedor(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<FornecedorPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let fornecedor = app_state
        .crm_repo
        .update_fornecedor(id, &payload.nome)
        .await?;
    Ok((StatusCode::OK, Json(fornecedor)))
}

pub async fn excluir_fornecedor(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.crm_repo.delete_fornecedor(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---
// Tags
// ---

pub async fn listar_tags(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let tags = app_state.crm_repo.get_all_tags().await?;
    Ok((StatusCode::OK, Json(tags)))
}

pub async fn criar_tag(
    State(app_state): State<AppState>,
    Json(payload): Json<TagPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let tag = app_state.crm_repo.create_tag(&payload.nome).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}

pub async fn atualizar_tag(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<TagPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let tag = app_state.crm_repo.update_tag(id, &payload.nome).await?;
    Ok((StatusCode::OK, Json(tag)))
}

pub async fn excluir_tag(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.crm_repo.delete_tag(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
