mod config;
mod conversation;
mod errors;
mod knowledge;
mod llm_client;
mod routes;
mod rules;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::conversation::chat::ChatBot;
use crate::knowledge::KnowledgeBase;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::rules::router::IntentRouter;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("portfolio_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Portfolio API v{}", env!("CARGO_PKG_VERSION"));

    // The knowledge base is mandatory: a missing or malformed source aborts startup.
    let knowledge = KnowledgeBase::load(&config.data_path).with_context(|| {
        format!(
            "failed to load portfolio data from {}",
            config.data_path.display()
        )
    })?;
    let knowledge = Arc::new(knowledge);

    let router = Arc::new(IntentRouter::new(knowledge.clone()));

    let chat = match &config.anthropic_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone()).context("failed to build LLM HTTP client")?;
            info!("LLM backend enabled (model: {})", llm_client::MODEL);
            Some(Arc::new(ChatBot::new(Arc::new(llm), &knowledge)))
        }
        None => {
            info!("ANTHROPIC_API_KEY not set, answering from rules only");
            None
        }
    };

    let state = AppState {
        knowledge,
        router,
        chat,
        config: config.clone(),
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
