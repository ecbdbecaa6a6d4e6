mod config;
mod errors;
mod extraction;
mod llm_client;
mod models;
mod pipeline;
mod routes;
mod search;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::search::{QueryPolicy, SearchClient};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing credentials)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Job Finder API v{}", env!("CARGO_PKG_VERSION"));

    let llm = LlmClient::new(
        config.summarizer_api_key.clone(),
        config.summarizer_url.clone(),
        config.summarizer_model.clone(),
    )?;
    info!("LLM client initialized (model: {})", llm.model());

    let search = SearchClient::new(
        config.search_api_key.clone(),
        config.search_url.clone(),
        config.search_auth_scheme,
        config.search_location.clone(),
    )?;
    info!(
        "Search client initialized ({}, auth: {:?})",
        config.search_url, config.search_auth_scheme
    );

    let query_policy = QueryPolicy {
        prefix: config.search_query_prefix.clone(),
        max_chars: config.search_max_query_chars,
    };
    info!(
        "Query policy: prefix={:?} max_chars={}",
        query_policy.prefix, query_policy.max_chars
    );

    let state = AppState {
        summarizer: Arc::new(llm),
        job_search: Arc::new(search),
        query_policy,
        max_upload_bytes: config.max_upload_bytes,
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
