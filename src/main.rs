// src/main.rs

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod common;
mod config;
mod db;
mod handlers;
mod models;
mod services;

use crate::config::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let usuario_routes = Router::new()
        .route("/", get(handlers::usuarios::listar).post(handlers::usuarios::criar))
        .route(
            "/{id}",
            axum::routing::put(handlers::usuarios::atualizar).delete(handlers::usuarios::excluir),
        );

    let cliente_routes = Router::new()
        .route(
            "/",
            get(handlers::crm::listar_clientes).post(handlers::crm::criar_cliente),
        )
        .route(
            "/{id}",
            axum::routing::put(handlers::crm::atualizar_cliente)
                .delete(handlers::crm::excluir_cliente),
        );

    let fornecedor_routes = Router::new()
        .route(
            "/",
            get(handlers::crm::listar_fornecedores).post(handlers::crm::criar_fornecedor),
        )
        .route(
            "/{id}",
            axum::routing::put(handlers::crm::atualizar_fornecedor)
                .delete(handlers::crm::excluir_fornecedor),
        );

    let tag_routes = Router::new()
        .route(
            "/",
            get(handlers::crm::listar_tags).post(handlers::crm::criar_tag),
        )
        .route(
            "/{id}",
            axum::routing::put(handlers::crm::atualizar_tag).delete(handlers::crm::excluir_tag),
        );

    let despesa_routes = Router::new()
        .route(
            "/",
            get(handlers::finance::listar_despesas).post(handlers::finance::criar_despesa),
        )
        // GET por usuário compartilha o segmento com PUT/DELETE por id
        .route(
            "/{id}",
            get(handlers::finance::listar_despesas_do_usuario)
                .put(handlers::finance::atualizar_despesa)
                .delete(handlers::finance::excluir_despesa),
        );

    let receita_routes = Router::new()
        .route(
            "/",
            get(handlers::finance::listar_receitas).post(handlers::finance::criar_receita),
        )
        .route(
            "/{id}",
            get(handlers::finance::buscar_receita)
                .put(handlers::finance::atualizar_receita)
                // A exclusão devolve ao estoque o que os itens consumiram,
                // em uma única transação.
                .delete(handlers::finance::excluir_receita),
        );

    let produto_routes = Router::new()
        .route(
            "/",
            get(handlers::inventory::listar_produtos).post(handlers::inventory::criar_produto),
        )
        .route(
            "/{id}",
            axum::routing::put(handlers::inventory::atualizar_produto)
                .delete(handlers::inventory::excluir_produto),
        );

    let estoque_routes = Router::new().route(
        "/",
        get(handlers::inventory::listar_entradas).post(handlers::inventory::registrar_entrada),
    );

    // Combina tudo no router principal
    let app = Router::new()
        .route("/", get(|| async { "API: minharenda" }))
        .route("/login", post(handlers::auth::login))
        .nest("/usuarios", usuario_routes)
        .nest("/clientes", cliente_routes)
        .nest("/fornecedores", fornecedor_routes)
        .nest("/tags", tag_routes)
        .nest("/despesas", despesa_routes)
        .nest("/receitas", receita_routes)
        .nest("/produtos", produto_routes)
        .nest("/estoques", estoque_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Inicia o servidor
    let porta = std::env::var("PORTA").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{}", porta);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!(
        "🚀 Servidor rodando na porta: {}",
        listener.local_addr().expect("endereço local").port()
    );
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
