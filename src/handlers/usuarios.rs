// src/handlers/usuarios.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::{common::error::AppError, config::AppState, models::auth::UsuarioPayload};

pub async fn listar(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let usuarios = app_state.user_repo.get_all().await?;
    Ok((StatusCode::OK, Json(usuarios)))
}

pub async fn criar(
    State(app_state): State<AppState>,
    Json(payload): Json<UsuarioPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let usuario = app_state.auth_service.registrar_usuario(&payload).await?;
    Ok((StatusCode::CREATED, Json(usuario)))
}

pub async fn atualizar(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UsuarioPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let usuario = app_state
        .auth_service
        .atualizar_usuario(id, &payload)
        .await?;
    Ok((StatusCode::OK, Json(usuario)))
}

pub async fn excluir(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.user_repo.delete_usuario(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
