//! Application wiring — builds the shared state from [`Config`] and serves it.

use crate::api;
use anyhow::Context;
use std::sync::Arc;
use vacancy_clickhouse::{ClickHouseOptions, ClickHouseStore};
use vacancy_core::config::{Config, StoreBackend};
use vacancy_core::{CascadeSearch, MemoryStore, PostingStore, QueryParser, SynonymDictionary};

/// State shared by every request. Everything inside is immutable or
/// internally synchronised.
#[derive(Clone)]
pub struct AppState {
    pub parser: Arc<QueryParser>,
    pub search: Arc<CascadeSearch>,
    pub page_size: u64,
}

impl AppState {
    pub fn new(
        synonyms: Arc<SynonymDictionary>,
        store: Arc<dyn PostingStore>,
        config: &Config,
    ) -> Self {
        Self {
            parser: Arc::new(QueryParser::new(synonyms)),
            search: Arc::new(CascadeSearch::new(store, config.store.query_timeout())),
            page_size: config.server.page_size,
        }
    }
}

/// Open the configured store. Startup failures here are fatal.
pub async fn open_store(config: &Config) -> anyhow::Result<Arc<dyn PostingStore>> {
    match config.store.backend {
        StoreBackend::Memory => {
            let store = match config.store.fixtures_path() {
                Some(path) => MemoryStore::load_fixtures(path)
                    .with_context(|| format!("loading fixtures from {}", path.display()))?,
                None => MemoryStore::new(),
            };
            tracing::info!(postings = store.len().await, "using in-memory store");
            Ok(Arc::new(store))
        }
        StoreBackend::ClickHouse => {
            let store = ClickHouseStore::new(ClickHouseOptions::from(&config.store))?;
            store
                .ping()
                .await
                .with_context(|| format!("ClickHouse ping failed at {}", config.store.url))?;
            if config.store.provision_schema {
                store.ensure_schema().await.context("provisioning postings table")?;
            }
            tracing::info!(url = %config.store.url, table = %config.store.table, "using ClickHouse store");
            Ok(Arc::new(store))
        }
    }
}

/// Load everything, bind the listener and serve until Ctrl+C.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let synonyms = SynonymDictionary::load(&config.synonyms.path).with_context(|| {
        format!(
            "failed to load synonyms from {}",
            config.synonyms.path.display()
        )
    })?;
    let store = open_store(&config).await?;
    let state = AppState::new(Arc::new(synonyms), store, &config);

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("binding {}", config.server.bind))?;
    tracing::info!(addr = %listener.local_addr()?, "search service listening");

    axum::serve(listener, api::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("search service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
