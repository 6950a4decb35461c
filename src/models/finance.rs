// src/models/finance.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

// ---
// Validações customizadas para Decimal (o `validator` não tem range p/ Decimal)
// ---
pub(crate) fn valida_positivo(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.message = Some("Valor deve ser positivo".into());
        return Err(err);
    }
    Ok(())
}

pub(crate) fn valida_nao_negativo(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Despesas
// ---

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Despesa {
    pub id: i64,
    pub descricao: String,
    pub valor: Decimal,
    pub categoria: Option<String>,
    pub anexo: Option<String>,
    pub data: NaiveDate,
    pub usuario_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DespesaPayload {
    pub descricao: String,

    #[validate(custom(function = "valida_positivo"))]
    pub valor: Decimal,

    #[validate(length(min = 2, message = "Nome da categoria deve possuir, no mínimo, 2 caracteres"))]
    pub categoria: Option<String>,

    // links, não especifica .png/.jpg
    #[validate(url(message = "Anexo deve ser uma URL válida"))]
    pub anexo: Option<String>,

    pub data: NaiveDate,
    pub usuario_id: Uuid,
}

// ---
// Receitas (documento de venda/renda) e seus itens
// ---

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Receita {
    pub id: i64,
    pub descricao: String,
    pub valor: Decimal,
    pub categoria: String,
    pub anexo: Option<String>,
    pub tag_id: Option<i64>,
    pub cliente_id: i64,
    pub usuario_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Receita com o nome do cliente (listagem, join raso)
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ReceitaComCliente {
    pub id: i64,
    pub descricao: String,
    pub valor: Decimal,
    pub categoria: String,
    pub anexo: Option<String>,
    pub tag_id: Option<i64>,
    pub cliente_id: i64,
    pub cliente_nome: String,
    pub usuario_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Item de uma receita. Imutável depois de criado: a exclusão da receita
/// o lê apenas para devolver a quantidade consumida ao estoque.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ReceitaItem {
    pub id: i64,
    pub receita_id: i64,
    pub produto_id: i64,
    pub quantidade: Decimal, // na unidade base do produto
    pub preco_unitario: Decimal,
    pub subtotal: Decimal,
    pub created_at: DateTime<Utc>,
}

// Receita completa, com itens (GET por id)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceitaDetalhada {
    #[serde(flatten)]
    pub receita: Receita,
    pub itens: Vec<ReceitaItem>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReceitaItemPayload {
    pub produto_id: i64,

    #[validate(custom(function = "valida_positivo"))]
    pub quantidade: Decimal,

    #[validate(custom(function = "valida_nao_negativo"))]
    pub preco_unitario: Decimal,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReceitaPayload {
    #[validate(length(min = 2, message = "Nome da descrição deve possuir, no mínimo, 2 caracteres"))]
    pub descricao: String,

    #[validate(custom(function = "valida_positivo"))]
    pub valor: Decimal,

    // links, não especifica .png/.jpg
    #[validate(url(message = "Anexo deve ser uma URL válida"))]
    pub anexo: Option<String>,

    #[validate(length(min = 2, message = "Nome da categoria deve possuir, no mínimo, 2 caracteres"))]
    pub categoria: String,

    pub tag_id: Option<i64>,
    pub cliente_id: i64,
    pub usuario_id: Uuid,

    // Itens são opcionais: uma receita pode não consumir estoque algum.
    // `nested` valida cada item e preserva o índice no caminho do erro.
    #[serde(default)]
    #[validate(nested)]
    pub itens: Vec<ReceitaItemPayload>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload_com_itens(itens: Vec<ReceitaItemPayload>) -> ReceitaPayload {
        ReceitaPayload {
            descricao: "Venda de doces".to_string(),
            valor: Decimal::from(100),
            anexo: None,
            categoria: "Vendas".to_string(),
            tag_id: None,
            cliente_id: 1,
            usuario_id: Uuid::nil(),
            itens,
        }
    }

    #[test]
    fn payload_valido_com_itens_passa() {
        let payload = payload_com_itens(vec![ReceitaItemPayload {
            produto_id: 7,
            quantidade: Decimal::from(2),
            preco_unitario: Decimal::ONE,
        }]);
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn item_com_quantidade_invalida_reprova_o_payload_inteiro() {
        let payload = payload_com_itens(vec![
            ReceitaItemPayload {
                produto_id: 7,
                quantidade: Decimal::from(2),
                preco_unitario: Decimal::ONE,
            },
            ReceitaItemPayload {
                produto_id: 9,
                quantidade: Decimal::from(-1),
                preco_unitario: Decimal::ONE,
            },
        ]);
        assert!(payload.validate().is_err());
    }

    #[test]
    fn item_com_preco_negativo_reprova_o_payload() {
        let payload = payload_com_itens(vec![ReceitaItemPayload {
            produto_id: 7,
            quantidade: Decimal::from(2),
            preco_unitario: Decimal::from(-3),
        }]);
        assert!(payload.validate().is_err());
    }
}
