//! ytdl-server
//!
//! A small HTTP front-end over yt-dlp: one endpoint resolves a video URL
//! into display metadata, the other downloads the media and hands back an
//! MP3 or MP4 produced by ffmpeg post-processing.

mod config;
mod config_file;
mod error;
mod extractor;
mod http;
#[cfg(test)]
mod integration;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;
use crate::error::{Result, ServerError};
use crate::http::create_router;
use crate::state::AppState;

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
const APP_NAME: &str = "ytdl-server";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    init_logging();

    tracing::info!("{} v{} starting", APP_NAME, VERSION);

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());
    let config = if std::path::Path::new(&config_path).exists() {
        match crate::config_file::ConfigFile::from_file(&config_path) {
            Ok(cf) => cf.into_server_config(),
            Err(e) => {
                tracing::warn!(
                    "Failed to load config file {}: {}. Using defaults.",
                    config_path,
                    e
                );
                ServerConfig::default()
            }
        }
    } else {
        ServerConfig::default()
    };
    tracing::info!("Configuration loaded: {:?}", config);

    // Create application state and surface readiness findings. Missing
    // binaries degrade the endpoints but do not block startup.
    let state = Arc::new(AppState::new(config.clone()));
    if state.readiness.is_ready() {
        tracing::info!("External binaries located");
    } else {
        for warning in &state.readiness.warnings {
            tracing::warn!("Readiness: {}", warning);
        }
    }
    state.prepare_scratch_dir()?;
    tracing::info!(
        "Scratch directory ready: {}",
        config.extractor.scratch_dir.display()
    );

    // Build router
    let app = create_router(state.clone());

    // Start server
    let addr: SocketAddr = config
        .socket_addr()
        .parse()
        .map_err(|e| ServerError::Config(format!("invalid listen address: {}", e)))?;
    tracing::info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize logging with tracing
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ytdl_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
