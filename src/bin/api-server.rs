//! Yodha API Server
//!
//! HTTP API with health check, metrics and the signal/thesis endpoints.
//! The engine holds no per-request state, so instances scale horizontally.

use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};
use yodha::config::{get_environment, ConfluenceConfig, ServerConfig};
use yodha::core::http::start_server;
use yodha::logging;
use yodha::signals::ConfluenceEngine;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let server_config = ServerConfig::from_env();
    let port = server_config.port;
    let engine = ConfluenceEngine::new(ConfluenceConfig::from_env()?);

    info!("Starting Yodha API Server");
    info!(environment = %get_environment(), "Environment");
    info!(port = port, "HTTP Server: http://0.0.0.0:{}", port);

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(port, engine).await {
            error!(error = %e, "HTTP server error");
        }
    });

    info!("API server started, waiting for shutdown signal...");
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
            info!("API server stopped");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
