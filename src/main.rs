//! Iris Predictor Service - Main Entry Point
//!
//! Loads the trained model artifact once at startup and serves predictions
//! over HTTP. If the artifact is missing or unreadable the service starts
//! in degraded mode and reports the failure on each predict call instead
//! of crashing.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use iris_predictor::{
    config::AppConfig,
    metrics::{MetricsReporter, ServiceMetrics},
    server::{self, AppState, ModelState},
};
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;

    // Initialize logging; RUST_LOG overrides the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("iris_predictor={}", config.logging.level).parse()?),
        )
        .init();

    info!("Starting Iris predictor service");
    info!(
        artifact_path = %config.model.artifact_path,
        host = %config.server.host,
        port = config.server.port,
        "Configuration loaded"
    );

    // Load the model exactly once; failures degrade instead of aborting
    let model = ModelState::load(Path::new(&config.model.artifact_path));

    let metrics = Arc::new(ServiceMetrics::new());
    let state = Arc::new(AppState::new(model, metrics.clone()));

    // Periodic metrics summary every 30 seconds
    let reporter = MetricsReporter::new(metrics.clone(), 30);
    tokio::spawn(async move {
        reporter.start().await;
    });

    tokio::select! {
        ret = server::run(state, &config) => ret?,
        _ = signal::ctrl_c() => {
            info!("Received shutdown signal");
        }
    }

    metrics.print_summary();
    Ok(())
}
