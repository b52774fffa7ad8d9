mod chat;
mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod resume;
mod routes;
mod state;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::chat::chat_log::{ChatLog, PgChatLog};
use crate::config::Config;
use crate::db::{create_chat_log_pool, ensure_chat_table};
use crate::llm_client::OpenRouterClient;
use crate::resume::load_resume;
use crate::routes::{build_router, cors_layer};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume chat API v{}", env!("CARGO_PKG_VERSION"));

    // Resume text is fixed for the life of the process
    let resume = load_resume(Path::new(&config.resume_path)).await;

    // Chat log store (optional)
    let chat_log: Option<Arc<dyn ChatLog>> =
        create_chat_log_pool(config.database_url.as_deref(), config.database_name.as_deref()).map(
            |pool| {
                let schema_pool = pool.clone();
                tokio::spawn(async move { ensure_chat_table(&schema_pool).await });
                Arc::new(PgChatLog::new(pool)) as Arc<dyn ChatLog>
            },
        );

    // Initialize LLM client
    let llm = OpenRouterClient::from_config(&config)?;
    if config.openrouter_api_key.is_none() {
        warn!("OPENROUTER_API_KEY not set; /api/chat will return 500");
    }
    info!("LLM client initialized (model: {})", llm.model());

    let cors = cors_layer(&config.allowed_origins)?;
    info!("CORS allowed origins: {:?}", config.allowed_origins);

    let state = AppState {
        config: config.clone(),
        resume,
        llm: Arc::new(llm),
        chat_log,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
