//! Energy inference server
//!
//! Serves energy-consumption forecasting, anomaly scoring, and descriptive
//! statistics over HTTP. A predictive model artifact is loaded best-effort
//! at startup; when it is absent the service runs in fallback-only mode.

use anyhow::Result;
use inference_server::{api, config};
use inference_lib::{EngineMetrics, ModelHandle, OnnxModel, StructuredLogger};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and env filter
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    info!("Starting inference-server");

    // Load configuration
    let cfg = config::ServerConfig::load()?;

    // Load the model best-effort; absence must never crash the process
    let model = load_model(&cfg.model_path);

    // Initialize metrics
    let metrics = EngineMetrics::new();
    if model.is_available() {
        metrics.set_model_info(SERVER_VERSION, &cfg.model_path);
    }

    // Initialize structured logger
    let logger = StructuredLogger::new("inference-server");
    logger.log_startup(SERVER_VERSION, model.is_available());

    // Create shared application state
    let state = Arc::new(api::AppState::new(
        model,
        cfg.model_path.clone(),
        metrics,
        logger.clone(),
    ));

    // Start the API server
    let _api_handle = tokio::spawn(api::serve(cfg.port, state));

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    logger.log_shutdown("SIGINT received");
    info!("Shutting down");

    Ok(())
}

/// Read and parse the model artifact, falling back to an absent handle
fn load_model(path: &str) -> ModelHandle {
    match std::fs::read(path) {
        Ok(bytes) => match OnnxModel::from_bytes(&bytes, SERVER_VERSION) {
            Ok(model) => {
                info!(path = %path, "Model loaded");
                ModelHandle::new(Arc::new(model))
            }
            Err(err) => {
                warn!(path = %path, error = %err, "Could not load model, running in fallback-only mode");
                ModelHandle::absent()
            }
        },
        Err(err) => {
            warn!(path = %path, error = %err, "Model file not readable, running in fallback-only mode");
            ModelHandle::absent()
        }
    }
}
