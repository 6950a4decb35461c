// src/services/inventory_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::InventoryRepository,
    models::inventory::EntradaEstoque,
};

/// Custo médio ponderado após uma entrada de estoque.
pub(crate) fn calcula_custo_medio(
    saldo_atual: Decimal,
    custo_medio_atual: Decimal,
    qtd_entrada: Decimal,
    custo_entrada: Decimal,
) -> Decimal {
    let valor_atual = saldo_atual * custo_medio_atual;
    let valor_entrada = qtd_entrada * custo_entrada;
    let novo_saldo = saldo_atual + qtd_entrada;

    if novo_saldo <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (valor_atual + valor_entrada) / novo_saldo
}

#[derive(Clone)]
pub struct InventoryService {
    inventory_repo: InventoryRepository,
    pool: PgPool,
}

impl InventoryService {
    pub fn new(inventory_repo: InventoryRepository, pool: PgPool) -> Self {
        Self {
            inventory_repo,
            pool,
        }
    }

    /// Registra uma entrada de estoque: credita o saldo do produto e
    /// recalcula o custo médio ponderado, numa única transação.
    pub async fn registrar_entrada(
        &self,
        produto_id: i64,
        quantidade: Decimal,
        custo_unitario: Decimal,
        usuario_id: Uuid,
    ) -> Result<EntradaEstoque, AppError> {
        let mut tx = self.pool.begin().await?;

        // Trava a linha do produto: o custo médio depende do saldo corrente.
        let produto = self
            .inventory_repo
            .find_produto_for_update(&mut *tx, produto_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Produto {}", produto_id)))?;

        let novo_custo = calcula_custo_medio(
            produto.saldo_estoque,
            produto.custo_medio,
            quantidade,
            custo_unitario,
        );

        self.inventory_repo
            .creditar_saldo(&mut *tx, produto_id, quantidade)
            .await?;
        self.inventory_repo
            .atualizar_custo_medio(&mut *tx, produto_id, novo_custo)
            .await?;

        let custo_total = quantidade * custo_unitario;
        let entrada = self
            .inventory_repo
            .create_entrada(
                &mut *tx,
                produto_id,
                quantidade,
                custo_unitario,
                custo_total,
                usuario_id,
            )
            .await?;

        tx.commit().await?;
        Ok(entrada)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custo_medio_pondera_pelo_saldo() {
        // 100 un a R$2,00 + 100 un a R$4,00 => R$3,00
        let novo = calcula_custo_medio(
            Decimal::from(100),
            Decimal::from(2),
            Decimal::from(100),
            Decimal::from(4),
        );
        assert_eq!(novo, Decimal::from(3));
    }

    #[test]
    fn primeira_entrada_assume_o_custo_da_compra() {
        let novo = calcula_custo_medio(
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::from(50),
            Decimal::new(125, 2), // 1.25
        );
        assert_eq!(novo, Decimal::new(125, 2));
    }

    #[test]
    fn saldo_resultante_zero_zera_o_custo() {
        let novo = calcula_custo_medio(
            Decimal::ZERO,
            Decimal::from(10),
            Decimal::ZERO,
            Decimal::from(99),
        );
        assert_eq!(novo, Decimal::ZERO);
    }
}
