mod config;
mod document;
mod entitlement;
mod errors;
mod generation;
mod layout;
mod llm_client;
mod models;
mod render;
mod routes;
mod share;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::entitlement::store::{EntitlementStore, MemoryEntitlementStore, RedisEntitlementStore};
use crate::entitlement::Entitlement;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
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

    info!("Starting CareerKit API v{}", env!("CARGO_PKG_VERSION"));

    // Entitlement persistence: Redis when configured, process memory otherwise
    let store: Arc<dyn EntitlementStore> = match &config.redis_url {
        Some(url) => Arc::new(RedisEntitlementStore::open(url)?),
        None => Arc::new(MemoryEntitlementStore::default()),
    };
    let premium = match store.load().await {
        Ok(premium) => premium,
        Err(e) => {
            warn!("Could not load entitlement from {}: {e}; starting unentitled", store.backend());
            false
        }
    };
    info!(backend = store.backend(), premium, "Entitlement initialized");

    // Generation backend is optional; its endpoints answer 503 without it
    let llm = match config.anthropic_api_key.clone() {
        Some(key) => {
            let client = LlmClient::new(key)?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(client)
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; generation endpoints are disabled");
            None
        }
    };

    let state = AppState {
        config: config.clone(),
        entitlement: Entitlement::new(premium),
        store,
        llm,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
