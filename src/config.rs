// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::{CrmRepository, FinanceRepository, InventoryRepository, UserRepository},
    services::{
        auth::AuthService, finance_service::FinanceService, inventory_service::InventoryService,
    },
};

// Estado da aplicação: a pool e o grafo de dependências montado uma única
// vez na inicialização. O client de banco é injetado, nunca global.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,

    pub user_repo: UserRepository,
    pub crm_repo: CrmRepository,
    pub finance_repo: FinanceRepository,
    pub inventory_repo: InventoryRepository,

    pub auth_service: AuthService,
    pub finance_service: FinanceService,
    pub inventory_service: InventoryService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_KEY").expect("JWT_KEY deve ser definida");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o grafo de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let crm_repo = CrmRepository::new(db_pool.clone());
        let finance_repo = FinanceRepository::new(db_pool.clone());
        let inventory_repo = InventoryRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo.clone(), jwt_secret);
        let finance_service = FinanceService::new(
            finance_repo.clone(),
            inventory_repo.clone(),
            db_pool.clone(),
        );
        let inventory_service = InventoryService::new(inventory_repo.clone(), db_pool.clone());

        Ok(Self {
            db_pool,
            user_repo,
            crm_repo,
            finance_repo,
            inventory_repo,
            auth_service,
            finance_service,
            inventory_service,
        })
    }
}
