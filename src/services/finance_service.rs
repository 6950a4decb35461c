// src/services/finance_service.rs

use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{FinanceRepository, InventoryRepository},
    models::finance::{Receita, ReceitaDetalhada, ReceitaItem, ReceitaItemPayload},
};

/// Soma as quantidades consumidas, agrupadas por produto.
///
/// A agregação é obrigatória mesmo quando cada produto aparece em um único
/// item: ela garante um único delta por produto quando há referências
/// duplicadas dentro da mesma receita, e é inócua no caso comum.
pub(crate) fn agrega_por_produto(itens: &[ReceitaItem]) -> HashMap<i64, Decimal> {
    let mut devolucoes: HashMap<i64, Decimal> = HashMap::new();
    for item in itens {
        *devolucoes.entry(item.produto_id).or_insert(Decimal::ZERO) += item.quantidade;
    }
    devolucoes
}

/// Interpreta o parâmetro de rota como id numérico de receita.
/// Identificador inválido falha aqui, antes de qualquer acesso ao banco.
pub(crate) fn parse_receita_id(id_param: &str) -> Result<i64, AppError> {
    id_param
        .trim()
        .parse::<i64>()
        .map_err(|_| AppError::InvalidId(id_param.to_string()))
}

#[derive(Clone)]
pub struct FinanceService {
    finance_repo: FinanceRepository,
    inventory_repo: InventoryRepository,
    pool: PgPool,
}

impl FinanceService {
    pub fn new(
        finance_repo: FinanceRepository,
        inventory_repo: InventoryRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            finance_repo,
            inventory_repo,
            pool,
        }
    }

    /// Cria uma receita e, se houver itens, baixa o estoque consumido —
    /// tudo dentro de uma única transação.
    pub async fn criar_receita(
        &self,
        descricao: &str,
        valor: Decimal,
        categoria: &str,
        anexo: Option<&str>,
        tag_id: Option<i64>,
        cliente_id: i64,
        usuario_id: Uuid,
        itens: &[ReceitaItemPayload],
    ) -> Result<ReceitaDetalhada, AppError> {
        let mut tx = self.pool.begin().await?;

        let receita = self
            .finance_repo
            .create_receita(
                &mut *tx, descricao, valor, categoria, anexo, tag_id, cliente_id, usuario_id,
            )
            .await?;

        let mut itens_criados = Vec::with_capacity(itens.len());
        for item in itens {
            let subtotal = item.quantidade * item.preco_unitario;
            let criado = self
                .finance_repo
                .create_item(
                    &mut *tx,
                    receita.id,
                    item.produto_id,
                    item.quantidade,
                    item.preco_unitario,
                    subtotal,
                )
                .await?;

            // Baixa o consumo do saldo do produto (delta atômico).
            self.inventory_repo
                .debitar_saldo(&mut *tx, item.produto_id, item.quantidade)
                .await?;

            itens_criados.push(criado);
        }

        tx.commit().await?;
        Ok(ReceitaDetalhada {
            receita,
            itens: itens_criados,
        })
    }

    /// Exclui uma receita devolvendo ao estoque as quantidades consumidas
    /// pelos seus itens.
    ///
    /// Tudo ou nada: busca os itens, soma as quantidades por produto,
    /// credita um delta por produto, apaga itens e receita, e só então
    /// commita. Qualquer falha no caminho desfaz a transação inteira —
    /// nenhum crédito parcial sobrevive e a receita continua existindo.
    pub async fn excluir_receita(&self, id_param: &str) -> Result<(), AppError> {
        let receita_id = parse_receita_id(id_param)?;

        let mut tx = self.pool.begin().await?;

        // Receita inexistente é erro do cliente (404), não falha de transação.
        self.finance_repo
            .find_receita(&mut *tx, receita_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Receita".to_string()))?;

        // Uma receita sem itens é legítima: a agregação fica vazia e
        // pulamos direto para a exclusão.
        let itens = self
            .finance_repo
            .get_itens_da_receita(&mut *tx, receita_id)
            .await?;

        let devolucoes = agrega_por_produto(&itens);

        // Um único incremento por produto, mesmo com itens duplicados.
        // A ordem entre produtos distintos é irrelevante.
        for (produto_id, quantidade) in devolucoes {
            self.inventory_repo
                .creditar_saldo(&mut *tx, produto_id, quantidade)
                .await?;
        }

        self.finance_repo
            .delete_itens_da_receita(&mut *tx, receita_id)
            .await?;
        self.finance_repo
            .delete_receita(&mut *tx, receita_id)
            .await?;

        tx.commit().await?;

        tracing::info!(
            receita_id,
            itens = itens.len(),
            "Receita excluída com devolução de estoque"
        );
        Ok(())
    }

    /// Receita com seus itens (GET por id).
    /// As duas leituras rodam na mesma transação: uma exclusão concorrente
    /// não pode produzir uma receita recém-lida com lista de itens vazia.
    pub async fn buscar_receita(&self, id_param: &str) -> Result<ReceitaDetalhada, AppError> {
        let receita_id = parse_receita_id(id_param)?;

        let mut tx = self.pool.begin().await?;

        let receita: Receita = self
            .finance_repo
            .find_receita(&mut *tx, receita_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Receita".to_string()))?;

        let itens = self
            .finance_repo
            .get_itens_da_receita(&mut *tx, receita_id)
            .await?;

        tx.commit().await?;
        Ok(ReceitaDetalhada { receita, itens })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn item(produto_id: i64, quantidade: Decimal) -> ReceitaItem {
        ReceitaItem {
            id: 0,
            receita_id: 42,
            produto_id,
            quantidade,
            preco_unitario: Decimal::ONE,
            subtotal: quantidade,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn agrega_soma_itens_duplicados_do_mesmo_produto() {
        // Duas linhas do produto X (3 e 5) viram UM incremento de 8.
        let itens = vec![item(7, Decimal::from(3)), item(7, Decimal::from(5))];
        let mapa = agrega_por_produto(&itens);

        assert_eq!(mapa.len(), 1);
        assert_eq!(mapa[&7], Decimal::from(8));
    }

    #[test]
    fn agrega_separa_produtos_distintos() {
        // Cenário: receita 42 com [{7, 2}, {7, 3}, {9, 1}].
        let itens = vec![
            item(7, Decimal::from(2)),
            item(7, Decimal::from(3)),
            item(9, Decimal::from(1)),
        ];
        let mapa = agrega_por_produto(&itens);

        assert_eq!(mapa.len(), 2);
        assert_eq!(mapa[&7], Decimal::from(5));
        assert_eq!(mapa[&9], Decimal::from(1));
    }

    #[test]
    fn agrega_receita_sem_itens_fica_vazia() {
        let mapa = agrega_por_produto(&[]);
        assert!(mapa.is_empty());
    }

    #[test]
    fn agrega_preserva_quantidades_fracionarias() {
        let itens = vec![
            item(3, Decimal::new(1505, 1)), // 150.5
            item(3, Decimal::new(495, 1)),  // 49.5
        ];
        let mapa = agrega_por_produto(&itens);
        assert_eq!(mapa[&3], Decimal::from(200));
    }

    #[test]
    fn parse_aceita_id_numerico_com_espacos() {
        assert_eq!(parse_receita_id("42").unwrap(), 42);
        assert_eq!(parse_receita_id(" 42 ").unwrap(), 42);
    }

    #[test]
    fn parse_rejeita_id_nao_numerico() {
        for invalido in ["abc", "4x2", "", "12.5", "--3"] {
            match parse_receita_id(invalido) {
                Err(AppError::InvalidId(s)) => assert_eq!(s, invalido),
                outro => panic!("esperava InvalidId, obteve {:?}", outro.map(|_| ())),
            }
        }
    }
}

// Testes contra um Postgres real: `#[sqlx::test]` provisiona um banco
// descartável por teste a partir de DATABASE_URL e aplica ./migrations.
// Ficam `#[ignore]` para a suíte rodar sem banco; com DATABASE_URL
// apontando para um Postgres local, `cargo test -- --ignored` os executa.
#[cfg(test)]
mod pg_tests {
    use super::*;
    use crate::db::{CrmRepository, UserRepository};
    use crate::models::inventory::UnidadeBase;

    fn servico(pool: &PgPool) -> FinanceService {
        FinanceService::new(
            FinanceRepository::new(pool.clone()),
            InventoryRepository::new(pool.clone()),
            pool.clone(),
        )
    }

    // Usuário e cliente mínimos para satisfazer as FKs das receitas.
    async fn monta_base(pool: &PgPool) -> (Uuid, i64) {
        let usuario = UserRepository::new(pool.clone())
            .create_usuario(
                "Maria Teste",
                "maria@exemplo.com",
                "hash-irrelevante",
                "12345678901",
                "11999999999",
            )
            .await
            .unwrap();
        let cliente = CrmRepository::new(pool.clone())
            .create_cliente("Cliente Teste", "", "Rua A, 1", None, usuario.id)
            .await
            .unwrap();
        (usuario.id, cliente.id)
    }

    async fn cria_produto(pool: &PgPool, usuario_id: Uuid, saldo_inicial: i64) -> i64 {
        let repo = InventoryRepository::new(pool.clone());
        let produto = repo
            .create_produto("Farinha", UnidadeBase::Gramas, None, usuario_id)
            .await
            .unwrap();
        if saldo_inicial > 0 {
            repo.creditar_saldo(pool, produto.id, Decimal::from(saldo_inicial))
                .await
                .unwrap();
        }
        produto.id
    }

    // Insere receita e itens direto pelos repositórios, sem debitar
    // estoque, para montar o estado inicial de cada caso.
    async fn cria_receita_com_itens(
        pool: &PgPool,
        usuario_id: Uuid,
        cliente_id: i64,
        itens: &[(i64, i64)],
    ) -> i64 {
        let repo = FinanceRepository::new(pool.clone());
        let receita = repo
            .create_receita(
                pool,
                "Venda de doces",
                Decimal::from(100),
                "Vendas",
                None,
                None,
                cliente_id,
                usuario_id,
            )
            .await
            .unwrap();
        for (produto_id, quantidade) in itens {
            let qtd = Decimal::from(*quantidade);
            repo.create_item(pool, receita.id, *produto_id, qtd, Decimal::ONE, qtd)
                .await
                .unwrap();
        }
        receita.id
    }

    async fn saldo_de(pool: &PgPool, produto_id: i64) -> Decimal {
        sqlx::query_scalar::<_, Decimal>("SELECT saldo_estoque FROM produtos WHERE id = $1")
            .bind(produto_id)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    // Receita com itens [{A, 2}, {A, 3}, {B, 1}], A com saldo 10 e B com 0:
    // a exclusão devolve 5 ao A e 1 ao B, e some com receita e itens.
    #[sqlx::test]
    #[ignore = "requer Postgres em DATABASE_URL"]
    async fn exclusao_devolve_estoque_e_remove_receita_e_itens(pool: PgPool) {
        let (usuario_id, cliente_id) = monta_base(&pool).await;
        let produto_a = cria_produto(&pool, usuario_id, 10).await;
        let produto_b = cria_produto(&pool, usuario_id, 0).await;
        let receita_id = cria_receita_com_itens(
            &pool,
            usuario_id,
            cliente_id,
            &[(produto_a, 2), (produto_a, 3), (produto_b, 1)],
        )
        .await;

        servico(&pool)
            .excluir_receita(&receita_id.to_string())
            .await
            .unwrap();

        assert_eq!(saldo_de(&pool, produto_a).await, Decimal::from(15));
        assert_eq!(saldo_de(&pool, produto_b).await, Decimal::from(1));

        let repo = FinanceRepository::new(pool.clone());
        assert!(repo.find_receita(&pool, receita_id).await.unwrap().is_none());
        assert!(repo
            .get_itens_da_receita(&pool, receita_id)
            .await
            .unwrap()
            .is_empty());
    }

    #[sqlx::test]
    #[ignore = "requer Postgres em DATABASE_URL"]
    async fn exclusao_de_receita_inexistente_nao_toca_no_estoque(pool: PgPool) {
        let (usuario_id, _) = monta_base(&pool).await;
        let produto = cria_produto(&pool, usuario_id, 10).await;

        let erro = servico(&pool).excluir_receita("9999").await.unwrap_err();
        assert_eq!(erro.code(), "NOT_FOUND");
        assert_eq!(saldo_de(&pool, produto).await, Decimal::from(10));
    }

    // Uma tabela extra com FK para a receita faz o DELETE final falhar
    // depois de os créditos já terem sido executados na transação. Nada
    // pode sobrar: saldo intacto, receita e itens ainda no lugar.
    #[sqlx::test]
    #[ignore = "requer Postgres em DATABASE_URL"]
    async fn falha_apos_os_creditos_desfaz_a_transacao_inteira(pool: PgPool) {
        let (usuario_id, cliente_id) = monta_base(&pool).await;
        let produto = cria_produto(&pool, usuario_id, 10).await;
        let receita_id =
            cria_receita_com_itens(&pool, usuario_id, cliente_id, &[(produto, 4)]).await;

        sqlx::query(
            r#"
            CREATE TABLE recibos_emitidos (
                id         BIGSERIAL PRIMARY KEY,
                receita_id BIGINT NOT NULL REFERENCES receitas (id)
            )
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query("INSERT INTO recibos_emitidos (receita_id) VALUES ($1)")
            .bind(receita_id)
            .execute(&pool)
            .await
            .unwrap();

        let erro = servico(&pool)
            .excluir_receita(&receita_id.to_string())
            .await
            .unwrap_err();
        assert_eq!(erro.code(), "OPERATION_FAILED");

        assert_eq!(saldo_de(&pool, produto).await, Decimal::from(10));
        let repo = FinanceRepository::new(pool.clone());
        assert!(repo.find_receita(&pool, receita_id).await.unwrap().is_some());
        assert_eq!(
            repo.get_itens_da_receita(&pool, receita_id)
                .await
                .unwrap()
                .len(),
            1
        );
    }

    // Duas receitas sobre o mesmo produto, excluídas ao mesmo tempo:
    // os créditos são deltas atômicos, nenhum pode ser perdido.
    #[sqlx::test]
    #[ignore = "requer Postgres em DATABASE_URL"]
    async fn exclusoes_concorrentes_nao_perdem_credito(pool: PgPool) {
        let (usuario_id, cliente_id) = monta_base(&pool).await;
        let produto = cria_produto(&pool, usuario_id, 10).await;
        let receita_1 =
            cria_receita_com_itens(&pool, usuario_id, cliente_id, &[(produto, 2)]).await;
        let receita_2 =
            cria_receita_com_itens(&pool, usuario_id, cliente_id, &[(produto, 2)]).await;

        let servico_1 = servico(&pool);
        let servico_2 = servico(&pool);
        let receita_1 = receita_1.to_string();
        let receita_2 = receita_2.to_string();
        let (r1, r2) = tokio::join!(
            servico_1.excluir_receita(&receita_1),
            servico_2.excluir_receita(&receita_2),
        );
        r1.unwrap();
        r2.unwrap();

        assert_eq!(saldo_de(&pool, produto).await, Decimal::from(14));
    }

    #[sqlx::test]
    #[ignore = "requer Postgres em DATABASE_URL"]
    async fn busca_retorna_receita_com_seus_itens(pool: PgPool) {
        let (usuario_id, cliente_id) = monta_base(&pool).await;
        let produto = cria_produto(&pool, usuario_id, 10).await;
        let receita_id = cria_receita_com_itens(
            &pool,
            usuario_id,
            cliente_id,
            &[(produto, 2), (produto, 3)],
        )
        .await;

        let detalhada = servico(&pool)
            .buscar_receita(&receita_id.to_string())
            .await
            .unwrap();

        assert_eq!(detalhada.receita.id, receita_id);
        assert_eq!(detalhada.itens.len(), 2);
    }
}
