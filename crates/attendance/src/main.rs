use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use attendance::api::{ApiClientConfig, AttendanceApiClient};
use attendance::config::AppConfig;
use attendance::server::create_router;
use attendance::types::AppState;
use tracing::{info, warn};

const CONFIG_ENV_VAR: &str = "ATTENDANCE_CONFIG";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(CONFIG_ENV_VAR).ok())
        .map(PathBuf::from);

    let config = match &config_path {
        Some(path) => AppConfig::load_from_file(path)
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AppConfig::default(),
    };

    tracing_subscriber::fmt()
        .with_max_level(config.tracing_level())
        .init();

    if config_path.is_none() {
        warn!("No config file given (argument or {CONFIG_ENV_VAR}), using defaults");
    }

    let api_client = AttendanceApiClient::with_config(ApiClientConfig::from(&config))
        .context("Failed to build attendance API client")?;

    let address = config.bind_address();
    info!(
        api_base_url = %config.api_base_url,
        address = %address,
        "Starting attendance form service"
    );

    let state = Arc::new(AppState { config, api_client });
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}
