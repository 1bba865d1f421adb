mod composer;
mod config;
mod consultation;
mod conversation;
mod errors;
mod knowledge;
mod llm_client;
mod routes;
mod session;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::knowledge::KnowledgeDocument;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::session::SessionRegistry;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Consult API v{}", env!("CARGO_PKG_VERSION"));

    // Load the knowledge document once; it is read-only from here on
    let knowledge = KnowledgeDocument::load(config.persona, &config.knowledge_path);
    info!(
        "Persona: {} (knowledge origin: {:?})",
        config.persona,
        knowledge.origin()
    );

    // Initialize LLM client
    let llm = LlmClient::new(config.openai_base_url.clone(), config.openai_api_key.clone())?;
    info!(
        "LLM client initialized (default model: {}, history mode: {:?})",
        config.default_model, config.history_mode
    );

    info!("Session idle TTL: {}s", config.session_idle_ttl.as_secs());

    let state = AppState {
        persona: config.persona,
        knowledge: Arc::new(knowledge),
        llm: Arc::new(llm),
        sessions: SessionRegistry::with_idle_ttl(config.session_idle_ttl),
        default_model: config.default_model,
        history_mode: config.history_mode,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the browser front end has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
