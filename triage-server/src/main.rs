//! Triage server - main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;

use triage_core::{GameConfig, GameEngine};
use triage_llm::GeminiClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "triage=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Triage server");

    // Load configuration
    let config = match std::env::var("TRIAGE_CONFIG") {
        Ok(path) => GameConfig::from_file(std::path::Path::new(&path))?,
        Err(_) => GameConfig::default(),
    }
    .with_env_overrides();

    let api_key = std::env::var("GEMINI_API_KEY").unwrap_or_default();
    if api_key.is_empty() {
        tracing::warn!("GEMINI_API_KEY not set; every generation will degrade to fallback content");
    }
    tracing::info!(model = %config.model, "generation client configured");

    let llm = Arc::new(GeminiClient::new(api_key));
    let engine = Arc::new(GameEngine::new(llm, config));

    // Any origin may call us; the frontend is served from elsewhere.
    let router = api::routes()
        .with_state(engine)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let server_host = std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let server_port: u16 = std::env::var("SERVER_PORT")
        .or_else(|_| std::env::var("PORT"))
        .unwrap_or_else(|_| "8000".into())
        .parse()
        .unwrap_or(8000);

    let addr: SocketAddr = format!("{server_host}:{server_port}").parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
