//! Model Trainer
//!
//! Fits the Iris classifier and writes the model artifact the predictor
//! service loads at startup. Standalone stage with no arguments; any
//! failure is fatal and exits nonzero.

use std::path::Path;

use anyhow::Result;
use iris_predictor::config::AppConfig;
use iris_predictor::models::{artifact, trainer::Trainer};
use tracing::info;

fn main() -> Result<()> {
    let config = AppConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("iris_predictor={}", config.logging.level).parse()?)
                .add_directive(format!("train_model={}", config.logging.level).parse()?),
        )
        .init();

    info!("Starting model training");

    let trainer = Trainer::new(config.training.clone());
    let trained = trainer.train()?;

    let path = Path::new(&config.model.artifact_path);
    artifact::save(&trained, path)?;

    info!(
        path = %path.display(),
        trained_at = %trained.trained_at,
        "Model artifact saved"
    );

    Ok(())
}
