// src/db/inventory_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::inventory::{EntradaEstoque, Produto, UnidadeBase},
};

#[derive(Clone)]
pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Produtos
    // ---

    pub async fn get_all_produtos(&self) -> Result<Vec<Produto>, AppError> {
        let produtos = sqlx::query_as::<_, Produto>(
            "SELECT * FROM produtos ORDER BY nome ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(produtos)
    }

    pub async fn create_produto(
        &self,
        nome: &str,
        unidade_base: UnidadeBase,
        categoria: Option<&str>,
        usuario_id: Uuid,
    ) -> Result<Produto, AppError> {
        let produto = sqlx::query_as::<_, Produto>(
            r#"
            INSERT INTO produtos (nome, unidade_base, categoria, usuario_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(nome)
        .bind(unidade_base)
        .bind(categoria)
        .bind(usuario_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(produto)
    }

    /// Atualiza apenas os dados de catálogo. Saldo e custo médio são
    /// mutados exclusivamente pelas operações de estoque.
    pub async fn update_produto(
        &self,
        id: i64,
        nome: &str,
        unidade_base: UnidadeBase,
        categoria: Option<&str>,
        ativo: bool,
        usuario_id: Uuid,
    ) -> Result<Produto, AppError> {
        sqlx::query_as::<_, Produto>(
            r#"
            UPDATE produtos
            SET nome = $2, unidade_base = $3, categoria = $4, ativo = $5,
                usuario_id = $6, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nome)
        .bind(unidade_base)
        .bind(categoria)
        .bind(ativo)
        .bind(usuario_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Produto".to_string()))
    }

    pub async fn delete_produto(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM produtos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Produto".to_string()));
        }
        Ok(())
    }

    /// Busca o produto travando a linha (FOR UPDATE), para cálculos de
    /// custo médio dentro de uma transação.
    pub async fn find_produto_for_update<'e, E>(
        &self,
        executor: E,
        id: i64,
    ) -> Result<Option<Produto>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let maybe_produto = sqlx::query_as::<_, Produto>(
            "SELECT * FROM produtos WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(maybe_produto)
    }

    // ---
    // Saldo de estoque
    // ---
    // Sempre um delta atômico no SQL (`saldo_estoque + $2`), nunca
    // read-modify-write: dois callers concorrentes sobre o mesmo produto
    // não podem perder atualização.

    /// Credita `quantidade` ao saldo do produto, na unidade base.
    pub async fn creditar_saldo<'e, E>(
        &self,
        executor: E,
        produto_id: i64,
        quantidade: Decimal,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE produtos
            SET saldo_estoque = saldo_estoque + $2, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(produto_id)
        .bind(quantidade)
        .execute(executor)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Produto {}", produto_id)));
        }
        Ok(())
    }

    /// Debita `quantidade` do saldo, recusando se o saldo ficaria negativo.
    /// A guarda fica na própria cláusula WHERE, mantendo a operação atômica.
    pub async fn debitar_saldo<'e, E>(
        &self,
        executor: E,
        produto_id: i64,
        quantidade: Decimal,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE produtos
            SET saldo_estoque = saldo_estoque - $2, updated_at = now()
            WHERE id = $1 AND saldo_estoque >= $2
            "#,
        )
        .bind(produto_id)
        .bind(quantidade)
        .execute(executor)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::EstoqueInsuficiente(produto_id));
        }
        Ok(())
    }

    pub async fn atualizar_custo_medio<'e, E>(
        &self,
        executor: E,
        produto_id: i64,
        novo_custo: Decimal,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            "UPDATE produtos SET custo_medio = $2, updated_at = now() WHERE id = $1",
        )
        .bind(produto_id)
        .bind(novo_custo)
        .execute(executor)
        .await?;
        Ok(())
    }

    // ---
    // Entradas de estoque
    // ---

    pub async fn get_all_entradas(&self) -> Result<Vec<EntradaEstoque>, AppError> {
        let entradas = sqlx::query_as::<_, EntradaEstoque>(
            "SELECT * FROM entradas_estoque ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(entradas)
    }

    pub async fn create_entrada<'e, E>(
        &self,
        executor: E,
        produto_id: i64,
        quantidade: Decimal,
        custo_unitario: Decimal,
        custo_total: Decimal,
        usuario_id: Uuid,
    ) -> Result<EntradaEstoque, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let entrada = sqlx::query_as::<_, EntradaEstoque>(
            r#"
            INSERT INTO entradas_estoque (produto_id, quantidade, custo_unitario, custo_total, usuario_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(produto_id)
        .bind(quantidade)
        .bind(custo_unitario)
        .bind(custo_total)
        .bind(usuario_id)
        .fetch_one(executor)
        .await?;
        Ok(entrada)
    }
}
