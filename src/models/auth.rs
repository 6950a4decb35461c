// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Usuario {
    pub id: Uuid,
    pub nome: String,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub senha: String,

    pub cpf: String,
    pub celular: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Dados para criação/atualização de usuário
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UsuarioPayload {
    #[validate(length(min = 3, message = "Nome deve possuir, no mínimo, 3 caracteres"))]
    pub nome: String,

    #[validate(
        email(message = "E-mail inválido"),
        length(min = 10, message = "E-mail muito curto")
    )]
    pub email: String,

    // As regras de composição (maiúscula, número, símbolo...) são
    // verificadas à parte, em `valida_senha`.
    #[validate(length(min = 6, message = "Senha deve possuir no mínimo 6 caracteres"))]
    pub senha: String,

    #[validate(length(
        min = 11,
        max = 11,
        message = "CPF deve conter 11 dígitos (somente números)"
    ))]
    pub cpf: String,

    #[validate(length(
        min = 11,
        max = 11,
        message = "Celular deve conter 11 dígitos (somente números)"
    ))]
    pub celular: String,
}

// Dados para login
#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub email: String,
    pub senha: String,
}

// Resposta de autenticação: dados básicos do usuário + token
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub id: Uuid,
    pub nome: String,
    pub email: String,
    pub token: String,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,    // Subject (ID do usuário)
    pub nome: String, // Nome do usuário logado
    pub exp: usize,   // Expiration time (quando o token expira)
    pub iat: usize,   // Issued At (quando o token foi criado)
}
