// src/db/crm_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::crm::{Cliente, ClienteDetalhado, Fornecedor, Tag},
};

#[derive(Clone)]
pub struct CrmRepository {
    pool: PgPool,
}

impl CrmRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CLIENTES
    // =========================================================================

    /// Listagem com os dados rasos das associações (tag e contagem de receitas).
    pub async fn get_all_clientes(&self) -> Result<Vec<ClienteDetalhado>, AppError> {
        let clientes = sqlx::query_as::<_, ClienteDetalhado>(
            r#"
            SELECT
                c.id, c.nome, c.notas, c.endereco, c.tag_id,
                t.nome AS tag_nome,
                c.usuario_id,
                (SELECT COUNT(*) FROM receitas r WHERE r.cliente_id = c.id) AS total_receitas,
                c.created_at, c.updated_at
            FROM clientes c
            LEFT JOIN tags t ON t.id = c.tag_id
            ORDER BY c.updated_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(clientes)
    }

    pub async fn create_cliente(
        &self,
        nome: &str,
        notas: &str,
        endereco: &str,
        tag_id: Option<i64>,
        usuario_id: Uuid,
    ) -> Result<Cliente, AppError> {
        let cliente = sqlx::query_as::<_, Cliente>(
            r#"
            INSERT INTO clientes (nome, notas, endereco, tag_id, usuario_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(nome)
        .bind(notas)
        .bind(endereco)
        .bind(tag_id)
        .bind(usuario_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(cliente)
    }

    pub async fn update_cliente(
        &self,
        id: i64,
        nome: &str,
        notas: &str,
        endereco: &str,
        tag_id: Option<i64>,
        usuario_id: Uuid,
    ) -> Result<Cliente, AppError> {
        sqlx::query_as::<_, Cliente>(
            r#"
            UPDATE clientes
            SET nome = $2, notas = $3, endereco = $4, tag_id = $5, usuario_id = $6,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nome)
        .bind(notas)
        .bind(endereco)
        .bind(tag_id)
        .bind(usuario_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Cliente".to_string()))
    }

    pub async fn delete_cliente(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM clientes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Cliente".to_string()));
        }
        Ok(())
    }

    // =========================================================================
    //  FORNECEDORES
    // =========================================================================

    pub async fn get_all_fornecedores(&self) -> Result<Vec<Fornecedor>, AppError> {
        let fornecedores = sqlx::query_as::<_, Fornecedor>(
            "SELECT * FROM fornecedores ORDER BY nome ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(fornecedores)
    }

    pub async fn create_fornecedor(&self, nome: &str) -> Result<Fornecedor, AppError> {
        let fornecedor = sqlx::query_as::<_, Fornecedor>(
            "INSERT INTO fornecedores (nome) VALUES ($1) RETURNING *",
        )
        .bind(nome)
        .fetch_one(&self.pool)
        .await?;
        Ok(fornecedor)
    }

    pub async fn update_fornecedor(&self, id: i64, nome: &str) -> Result<Fornecedor, AppError> {
        sqlx::query_as::<_, Fornecedor>(
            "UPDATE fornecedores SET nome = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(nome)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Fornecedor".to_string()))
    }

    pub async fn delete_fornecedor(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM fornecedores WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Fornecedor".to_string()));
        }
        Ok(())
    }

    // =========================================================================
    //  TAGS
    // =========================================================================

    pub async fn get_all_tags(&self) -> Result<Vec<Tag>, AppError> {
        let tags = sqlx::query_as::<_, Tag>("SELECT * FROM tags ORDER BY nome ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(tags)
    }

    pub async fn create_tag(&self, nome: &str) -> Result<Tag, AppError> {
        let tag = sqlx::query_as::<_, Tag>("INSERT INTO tags (nome) VALUES ($1) RETURNING *")
            .bind(nome)
            .fetch_one(&self.pool)
            .await?;
        Ok(tag)
    }

    pub async fn update_tag(&self, id: i64, nome: &str) -> Result<Tag, AppError> {
        sqlx::query_as::<_, Tag>("UPDATE tags SET nome = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(nome)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Tag".to_string()))
    }

    pub async fn delete_tag(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Tag".to_string()));
        }
        Ok(())
    }
}
