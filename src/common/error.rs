use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Cada variante carrega um código curto legível por máquina (ver `code()`).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Identificador de rota que não é um número válido.
    // Falha antes de qualquer acesso ao banco.
    #[error("Identificador inválido: '{0}'")]
    InvalidId(String),

    #[error("{0} não encontrado(a)")]
    NotFound(String),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Login ou senha incorretos")]
    InvalidCredentials,

    #[error("Senha fraca")]
    SenhaFraca(Vec<String>),

    #[error("Estoque insuficiente para o produto {0}")]
    EstoqueInsuficiente(i64),

    // Variante para erros de banco de dados (sqlx). A transação em curso
    // sofre rollback antes deste erro chegar ao handler.
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    /// Código curto e estável, para o cliente logar/tratar sem depender da mensagem.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::InvalidId(_) => "INVALID_ARGUMENT",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::SenhaFraca(_) => "WEAK_PASSWORD",
            AppError::EstoqueInsuficiente(_) => "INSUFFICIENT_STOCK",
            // Falhas de armazenamento/transação: seguras de re-tentar,
            // nenhum efeito parcial sobrevive ao rollback.
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => "OPERATION_FAILED",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();

        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "code": code,
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::SenhaFraca(erros) => {
                let body = Json(json!({ "code": code, "error": erros }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::InvalidId(ref id) => (
                StatusCode::BAD_REQUEST,
                format!("Identificador inválido: '{}'.", id),
            ),
            AppError::NotFound(ref o_que) => {
                (StatusCode::NOT_FOUND, format!("{} não encontrado(a).", o_que))
            }
            AppError::EmailAlreadyExists => {
                (StatusCode::CONFLICT, "Este e-mail já está em uso.".to_string())
            }
            AppError::InvalidCredentials => {
                (StatusCode::BAD_REQUEST, "Login ou senha incorretos.".to_string())
            }
            AppError::EstoqueInsuficiente(produto_id) => (
                StatusCode::BAD_REQUEST,
                format!("Estoque insuficiente para o produto {}.", produto_id),
            ),

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            // O `tracing` loga a mensagem detalhada que o `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "code": code, "error": error_message }));
        (status, body).into_response()
    }
}
