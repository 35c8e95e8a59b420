mod config;
mod error;
mod handlers;
mod openapi;
mod router;

use std::sync::Arc;

use anyhow::Result;
use diabetes_model::InferenceAdapter;
use tracing::{info, warn};

use crate::config::ServerConfig;

pub struct ServerState {
    pub adapter: InferenceAdapter,
    pub config: ServerConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .compact()
        .init();

    let config = ServerConfig::from_env()?;
    let adapter = InferenceAdapter::load(&config.model_path);
    if !adapter.is_ready() {
        warn!("Serving without a prediction pipeline; /predict will return 500");
    }

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!("Starting server on {}:{}", config.host, config.port);
    info!("API docs at {}", config.docs_path);

    let state = Arc::new(ServerState { adapter, config });
    let app = router::build(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
