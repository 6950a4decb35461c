// src/db/finance_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::finance::{Despesa, Receita, ReceitaComCliente, ReceitaItem},
};

#[derive(Clone)]
pub struct FinanceRepository {
    pool: PgPool,
}

impl FinanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  DESPESAS
    // =========================================================================

    pub async fn get_all_despesas(&self) -> Result<Vec<Despesa>, AppError> {
        let despesas = sqlx::query_as::<_, Despesa>(
            "SELECT * FROM despesas ORDER BY data DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(despesas)
    }

    pub async fn get_despesas_do_usuario(&self, usuario_id: Uuid) -> Result<Vec<Despesa>, AppError> {
        let despesas = sqlx::query_as::<_, Despesa>(
            "SELECT * FROM despesas WHERE usuario_id = $1 ORDER BY data DESC",
        )
        .bind(usuario_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(despesas)
    }

    pub async fn create_despesa(
        &self,
        descricao: &str,
        valor: Decimal,
        categoria: Option<&str>,
        anexo: Option<&str>,
        data: NaiveDate,
        usuario_id: Uuid,
    ) -> Result<Despesa, AppError> {
        let despesa = sqlx::query_as::<_, Despesa>(
            r#"
            INSERT INTO despesas (descricao, valor, categoria, anexo, data, usuario_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(descricao)
        .bind(valor)
        .bind(categoria)
        .bind(anexo)
        .bind(data)
        .bind(usuario_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(despesa)
    }

    pub async fn update_despesa(
        &self,
        id: i64,
        descricao: &str,
        valor: Decimal,
        categoria: Option<&str>,
        anexo: Option<&str>,
        data: NaiveDate,
        usuario_id: Uuid,
    ) -> Result<Despesa, AppError> {
        sqlx::query_as::<_, Despesa>(
            r#"
            UPDATE despesas
            SET descricao = $2, valor = $3, categoria = $4, anexo = $5, data = $6,
                usuario_id = $7, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(descricao)
        .bind(valor)
        .bind(categoria)
        .bind(anexo)
        .bind(data)
        .bind(usuario_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Despesa".to_string()))
    }

    pub async fn delete_despesa(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM despesas WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Despesa".to_string()));
        }
        Ok(())
    }

    // =========================================================================
    //  RECEITAS
    // =========================================================================
    // As escritas aceitam um `Executor` genérico para rodarem dentro da
    // transação aberta pelo service.

    pub async fn get_all_receitas(&self) -> Result<Vec<ReceitaComCliente>, AppError> {
        let receitas = sqlx::query_as::<_, ReceitaComCliente>(
            r#"
            SELECT
                r.id, r.descricao, r.valor, r.categoria, r.anexo, r.tag_id,
                r.cliente_id, c.nome AS cliente_nome,
                r.usuario_id, r.created_at, r.updated_at
            FROM receitas r
            JOIN clientes c ON c.id = r.cliente_id
            ORDER BY r.updated_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(receitas)
    }

    pub async fn find_receita<'e, E>(
        &self,
        executor: E,
        id: i64,
    ) -> Result<Option<Receita>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let maybe_receita = sqlx::query_as::<_, Receita>(
            "SELECT * FROM receitas WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(maybe_receita)
    }

    pub async fn create_receita<'e, E>(
        &self,
        executor: E,
        descricao: &str,
        valor: Decimal,
        categoria: &str,
        anexo: Option<&str>,
        tag_id: Option<i64>,
        cliente_id: i64,
        usuario_id: Uuid,
    ) -> Result<Receita, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let receita = sqlx::query_as::<_, Receita>(
            r#"
            INSERT INTO receitas (descricao, valor, categoria, anexo, tag_id, cliente_id, usuario_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(descricao)
        .bind(valor)
        .bind(categoria)
        .bind(anexo)
        .bind(tag_id)
        .bind(cliente_id)
        .bind(usuario_id)
        .fetch_one(executor)
        .await?;
        Ok(receita)
    }

    pub async fn update_receita(
        &self,
        id: i64,
        descricao: &str,
        valor: Decimal,
        categoria: &str,
        anexo: Option<&str>,
        tag_id: Option<i64>,
        cliente_id: i64,
        usuario_id: Uuid,
    ) -> Result<Receita, AppError> {
        sqlx::query_as::<_, Receita>(
            r#"
            UPDATE receitas
            SET descricao = $2, valor = $3, categoria = $4, anexo = $5,
                tag_id = $6, cliente_id = $7, usuario_id = $8, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(descricao)
        .bind(valor)
        .bind(categoria)
        .bind(anexo)
        .bind(tag_id)
        .bind(cliente_id)
        .bind(usuario_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Receita".to_string()))
    }

    /// Apaga a receita em si. Os itens já devem ter sido removidos antes,
    /// dentro da mesma transação.
    pub async fn delete_receita<'e, E>(&self, executor: E, id: i64) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM receitas WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Receita".to_string()));
        }
        Ok(())
    }

    // =========================================================================
    //  ITENS DE RECEITA
    // =========================================================================

    pub async fn get_itens_da_receita<'e, E>(
        &self,
        executor: E,
        receita_id: i64,
    ) -> Result<Vec<ReceitaItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let itens = sqlx::query_as::<_, ReceitaItem>(
            "SELECT * FROM receita_itens WHERE receita_id = $1 ORDER BY id ASC",
        )
        .bind(receita_id)
        .fetch_all(executor)
        .await?;
        Ok(itens)
    }

    pub async fn create_item<'e, E>(
        &self,
        executor: E,
        receita_id: i64,
        produto_id: i64,
        quantidade: Decimal,
        preco_unitario: Decimal,
        subtotal: Decimal,
    ) -> Result<ReceitaItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, ReceitaItem>(
            r#"
            INSERT INTO receita_itens (receita_id, produto_id, quantidade, preco_unitario, subtotal)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(receita_id)
        .bind(produto_id)
        .bind(quantidade)
        .bind(preco_unitario)
        .bind(subtotal)
        .fetch_one(executor)
        .await?;
        Ok(item)
    }

    /// Remove todos os itens de uma receita (antes de apagar a receita).
    pub async fn delete_itens_da_receita<'e, E>(
        &self,
        executor: E,
        receita_id: i64,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM receita_itens WHERE receita_id = $1")
            .bind(receita_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
