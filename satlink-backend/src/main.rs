use satlink_backend::config::BackendConfig;
use satlink_backend::logging;
use satlink_backend::service::{self, AppState};

use anyhow::{Context, Result};
use std::path::Path;
use tokio::net::TcpListener;

const CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = BackendConfig::load_or_default(CONFIG_PATH)?;

    // Initialize logging
    let _logging_guard = logging::init_logging(&config.log_dir, "satlink-backend", &config.log_level)?;

    tracing::info!("Satlink Backend starting...");
    if Path::new(CONFIG_PATH).exists() {
        tracing::info!("Loaded configuration from {}", CONFIG_PATH);
    } else {
        tracing::info!("No {} found, using built-in defaults", CONFIG_PATH);
    }
    tracing::debug!("Configuration: {:?}", config);

    let state = AppState::from_config(&config)?;
    let app = service::router(state, config.enable_cors);

    let address = config.server_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    tracing::info!("HTTP server listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Satlink Backend stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received.");
}
