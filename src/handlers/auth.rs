// src/handlers/auth.rs

use axum::{Json, extract::State};

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::{LoginPayload, LoginResponse},
};

// Handler de login: e-mail + senha => dados básicos do usuário + JWT
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<LoginResponse>, AppError> {
    if payload.email.is_empty() || payload.senha.is_empty() {
        return Err(AppError::InvalidCredentials);
    }

    let resposta = app_state
        .auth_service
        .login(&payload.email, &payload.senha)
        .await?;

    Ok(Json(resposta))
}
