mod config;
mod db;
mod errors;
mod generation;
mod llm_client;
mod locale;
mod models;
mod routes;
mod state;
mod storage;
mod tools;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::generation::{Generator, PdfTextExtractor};
use crate::llm_client::LlmClient;
use crate::routes::{build_router, with_static_ui};
use crate::state::AppState;
use crate::storage::{MemoryRecordStore, PgRecordStore, RecordStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Fails fast when the API key is missing
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Qalam API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(&config)?;
    info!(
        "LLM client initialized (model: {}, timeout: {}s, attempts: {})",
        llm.model(),
        config.llm_timeout_secs,
        config.llm_max_attempts
    );

    // Record store: Postgres when configured, otherwise process memory
    let store: Arc<dyn RecordStore> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            ensure_schema(&pool).await?;
            Arc::new(PgRecordStore::new(pool))
        }
        None => {
            info!("DATABASE_URL not set; records are kept in memory");
            Arc::new(MemoryRecordStore::default())
        }
    };

    let state = AppState {
        generator: Generator::new(Arc::new(llm)),
        store,
        extractor: Arc::new(PdfTextExtractor),
    };

    let mut app = build_router(state);
    if let Some(dir) = &config.static_dir {
        info!("Serving UI from {}", dir.display());
        app = with_static_ui(app, dir);
    }

    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
