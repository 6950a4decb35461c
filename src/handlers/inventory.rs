// src/handlers/inventory.rs

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
    models::inventory::{EntradaEstoquePayload, ProdutoPayload},
};

// ---
// Produtos
// ---

pub async fn listar_produtos(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let produtos = app_state.inventory_repo.get_all_produtos().await?;
    Ok((StatusCode::OK, Json(produtos)))
}

pub async fn criar_produto(
    State(app_state): State<AppState>,
    Json(payload): Json<ProdutoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let produto = app_state
        .inventory_repo
        .create_produto(
            &payload.nome,
            payload.unidade_base,
            payload.categoria.as_deref(),
            payload.usuario_id,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(produto)))
}

pub async fn atualizar_produto(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ProdutoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let produto = app_state
        .inventory_repo
        .update_produto(
            id,
            &payload.nome,
            payload.unidade_base,
            payload.categoria.as_deref(),
            payload.ativo.unwrap_or(true),
            payload.usuario_id,
        )
        .await?;
    Ok((StatusCode::OK, Json(produto)))
}

/// Exclusão simples de catálogo: nunca mexe em saldo de estoque.
pub async fn excluir_produto(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.inventory_repo.delete_produto(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---
// Entradas de estoque
// ---

pub async fn listar_entradas(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let entradas = app_state.inventory_repo.get_all_entradas().await?;
    Ok((StatusCode::OK, Json(entradas)))
}

pub async fn registrar_entrada(
    State(app_state): State<AppState>,
    Json(payload): Json<EntradaEstoquePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let entrada = app_state
        .inventory_service
        .registrar_entrada(
            payload.produto_id,
            payload.quantidade,
            payload.custo_unitario,
            payload.usuario_id,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(entrada)))
}
