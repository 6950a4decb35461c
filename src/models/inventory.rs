// src/models/inventory.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::finance::{valida_nao_negativo, valida_positivo};

// --- Unidade base de medida ---
// O saldo de estoque é SEMPRE armazenado nesta unidade. A conversão para a
// unidade de exibição (kg, L) é um cálculo de leitura, nunca persistido.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "unidade_base", rename_all = "SCREAMING_SNAKE_CASE")] // Banco
#[serde(rename_all = "SCREAMING_SNAKE_CASE")] // JSON
pub enum UnidadeBase {
    Gramas,
    Mililitros,
    Unidades,
}

impl UnidadeBase {
    /// Símbolo da unidade de exibição correspondente.
    pub fn unidade_exibicao(&self) -> &'static str {
        match self {
            UnidadeBase::Gramas => "kg",
            UnidadeBase::Mililitros => "L",
            UnidadeBase::Unidades => "un",
        }
    }

    /// Converte um saldo na unidade base para a unidade de exibição.
    pub fn para_exibicao(&self, saldo_base: Decimal) -> Decimal {
        match self {
            UnidadeBase::Gramas | UnidadeBase::Mililitros => saldo_base / Decimal::from(1000),
            UnidadeBase::Unidades => saldo_base,
        }
    }
}

// --- Produto (catálogo + saldo corrente) ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Produto {
    pub id: i64,
    pub nome: String,
    pub unidade_base: UnidadeBase,
    pub categoria: Option<String>,

    pub saldo_estoque: Decimal, // na unidade base
    pub custo_medio: Decimal,   // custo médio ponderado, por unidade base

    pub ativo: bool,
    pub usuario_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProdutoPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: String,

    pub unidade_base: UnidadeBase,

    #[validate(length(min = 2, message = "Nome da categoria deve possuir, no mínimo, 2 caracteres"))]
    pub categoria: Option<String>,

    // Se omitido, o produto permanece (ou nasce) ativo.
    #[serde(default)]
    pub ativo: Option<bool>,

    pub usuario_id: Uuid,
}

// --- Entrada de estoque (compra/reposição) ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EntradaEstoque {
    pub id: i64,
    pub produto_id: i64,
    pub quantidade: Decimal, // na unidade base do produto
    pub custo_unitario: Decimal,
    pub custo_total: Decimal,
    pub usuario_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EntradaEstoquePayload {
    pub produto_id: i64,

    #[validate(custom(function = "valida_positivo"))]
    pub quantidade: Decimal,

    #[validate(custom(function = "valida_nao_negativo"))]
    pub custo_unitario: Decimal,

    pub usuario_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn exibicao_converte_gramas_para_quilos() {
        let saldo = Decimal::from(2500);
        assert_eq!(
            UnidadeBase::Gramas.para_exibicao(saldo),
            Decimal::new(25, 1) // 2.5 kg
        );
        assert_eq!(UnidadeBase::Gramas.unidade_exibicao(), "kg");
    }

    #[test]
    fn exibicao_converte_mililitros_para_litros() {
        let saldo = Decimal::from(750);
        assert_eq!(
            UnidadeBase::Mililitros.para_exibicao(saldo),
            Decimal::new(75, 2) // 0.75 L
        );
    }

    #[test]
    fn exibicao_de_unidades_nao_converte() {
        let saldo = Decimal::from(12);
        assert_eq!(UnidadeBase::Unidades.para_exibicao(saldo), saldo);
        assert_eq!(UnidadeBase::Unidades.unidade_exibicao(), "un");
    }
}
