mod api;
mod config;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use file_manager::FileManager;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::api::AppState;
use crate::config::ServerConfig;

const DEFAULT_CONFIG_PATH: &str = "fileadmin.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    info!("starting fileadmin server");
    let config_path =
        std::env::var("FILEADMIN_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    let config = if Path::new(&config_path).exists() {
        info!(path = %config_path, "loading server config");
        ServerConfig::from_file(&config_path)
            .with_context(|| format!("failed to load server config from {config_path}"))?
    } else {
        warn!(path = %config_path, "config file not found, using defaults");
        ServerConfig::default()
    };

    let file_manager =
        FileManager::new(&config.file_manager).context("failed to initialize file manager")?;
    info!(
        root = %file_manager.root().display(),
        actions = file_manager.available_actions().len(),
        "file manager ready"
    );

    let app = api::create_router(Arc::new(AppState::new(file_manager)));
    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    info!(addr = %config.bind, "server is ready, press Ctrl+C to shut down");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated with error")?;

    info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        return;
    }
    info!("shutdown signal received, stopping server");
}

fn init_tracing() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}
