mod config;
mod discovery;
mod errors;
mod extract;
mod interview;
mod llm_client;
mod optimizer;
mod outreach;
mod parser;
mod routes;
mod search_config;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::discovery::DiscoveryEngine;
use crate::interview::InterviewPrep;
use crate::llm_client::{ChatBackend, LlmClient, GENERATION_API_URL, SEARCH_API_URL};
use crate::optimizer::ResumeOptimizer;
use crate::outreach::OutreachManager;
use crate::routes::build_router;
use crate::search_config::SearchConfigStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Scout API v{}", env!("CARGO_PKG_VERSION"));

    // One LLM client per provider: generation and search
    let generation: Arc<dyn ChatBackend> = Arc::new(LlmClient::new(
        GENERATION_API_URL,
        config.openai_api_key.clone(),
    ));
    let search: Arc<dyn ChatBackend> = Arc::new(LlmClient::new(
        SEARCH_API_URL,
        config.perplexity_api_key.clone(),
    ));
    info!("LLM clients initialized (generation + search)");

    // Search configuration store (seeds a default on first run)
    let store = Arc::new(SearchConfigStore::load(config.search_config_path.clone()));
    info!(
        "Search configuration store ready at {:?}",
        config.search_config_path
    );

    // Service objects, constructed once and injected into handlers
    let state = AppState {
        store: store.clone(),
        discovery: Arc::new(DiscoveryEngine::new(
            search.clone(),
            generation.clone(),
            store,
        )),
        optimizer: Arc::new(ResumeOptimizer::new(generation.clone())),
        outreach: Arc::new(OutreachManager::new(generation)),
        interview: Arc::new(InterviewPrep::new(search)),
        config: config.clone(),
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
