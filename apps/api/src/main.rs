mod config;
mod errors;
mod extraction;
mod generation;
mod llm_client;
mod mail;
mod research;
mod resume;
mod routes;
mod state;
mod tracking;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{GenerationConfig, LlmClient};
use crate::mail::Mailer;
use crate::research::CompanyResearcher;
use crate::routes::build_router;
use crate::state::AppState;
use crate::tracking::ApplicationTracker;

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

    info!("Starting JobPilot API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone(), GenerationConfig::default());
    info!("LLM client initialized (model: {})", llm.model());

    // Resolve search availability once; the researcher degrades internally
    let researcher = Arc::new(CompanyResearcher::new(config.serpapi_key.clone()));
    if researcher.search_available() {
        info!("Company researcher initialized with search capability");
    } else {
        info!("No search credential; company researcher will use the scraping fallback");
    }

    // Optional capabilities: mail transport and tracking store
    let mailer = match config.mail_config() {
        Some(mail_config) => {
            let mailer = Mailer::new(&mail_config)
                .map_err(|e| anyhow::anyhow!("failed to build mail transport: {e}"))?;
            info!(
                "Mail transport initialized ({}:{})",
                mail_config.smtp_server, mail_config.smtp_port
            );
            Some(Arc::new(mailer))
        }
        None => {
            info!("Mail not configured; send/test endpoints will report failure");
            None
        }
    };

    let tracker = match config.tracker_config() {
        Some(tracker_config) => {
            info!(
                "Application tracker initialized (table: {})",
                tracker_config.table_name
            );
            Some(Arc::new(ApplicationTracker::new(tracker_config)))
        }
        None => {
            info!("Tracking not configured; tracking endpoints will report failure");
            None
        }
    };

    // Build app state
    let state = AppState {
        llm,
        researcher,
        mailer,
        tracker,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
