// src/models/crm.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Cliente {
    pub id: i64,
    pub nome: String,
    pub notas: String,
    pub endereco: String,
    pub tag_id: Option<i64>,
    pub usuario_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Cliente com os dados rasos das associações (listagem)
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ClienteDetalhado {
    pub id: i64,
    pub nome: String,
    pub notas: String,
    pub endereco: String,
    pub tag_id: Option<i64>,
    pub tag_nome: Option<String>,
    pub usuario_id: Uuid,
    pub total_receitas: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ClientePayload {
    #[validate(length(min = 3, message = "Nome deve ter no mínimo 3 caracteres"))]
    pub nome: String,

    #[validate(length(min = 3, message = "Notas deve ter no mínimo 3 caracteres"))]
    pub notas: String,

    #[validate(length(min = 3, message = "Endereço deve ter no mínimo 3 caracteres"))]
    pub endereco: String,

    pub tag_id: Option<i64>,
    pub usuario_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Fornecedor {
    pub id: i64,
    pub nome: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct FornecedorPayload {
    #[validate(length(min = 3, message = "Nome do fornecedor deve possuir mín 3 caracteres."))]
    pub nome: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: i64,
    pub nome: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct TagPayload {
    #[validate(length(min = 2, message = "Nome da tag deve possuir, no mínimo, 2 caracteres"))]
    pub nome: String,
}
