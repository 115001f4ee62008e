//! Multinomial logistic regression training on the bundled Iris dataset.

use anyhow::{Context, Result};
use chrono::Utc;
use linfa::prelude::*;
use linfa::Dataset;
use ndarray::Ix1;
use linfa_logistic::{MultiFittedLogisticRegression, MultiLogisticRegression};
use tracing::{info, warn};

use crate::config::TrainingConfig;
use crate::dataset;
use crate::models::artifact::{ModelArtifact, SCHEMA_VERSION};

/// Fits the classifier and packages it as a model artifact.
pub struct Trainer {
    config: TrainingConfig,
}

impl Trainer {
    /// Create a trainer with the given tunables.
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    /// Fit on the bundled dataset and return the artifact to persist.
    ///
    /// A holdout split is evaluated for logging only; the shipped model is
    /// fitted on the full dataset.
    pub fn train(&self) -> Result<ModelArtifact> {
        let dataset = dataset::load();
        info!(
            samples = dataset.nsamples(),
            features = dataset.nfeatures(),
            "Dataset loaded"
        );

        self.log_holdout_accuracy();

        let model = fit_model(&dataset, self.config.max_iterations)?;
        info!(
            max_iterations = self.config.max_iterations,
            "Model trained on full dataset"
        );

        Ok(ModelArtifact {
            schema_version: SCHEMA_VERSION,
            feature_names: dataset::FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            class_names: dataset::CLASS_NAMES.iter().map(|s| s.to_string()).collect(),
            trained_at: Utc::now(),
            model,
        })
    }

    /// Fit a throwaway model on a shuffled split and log its held-out
    /// accuracy. Failures here only cost the log line.
    fn log_holdout_accuracy(&self) {
        let ratio = 1.0 - self.config.holdout_ratio;
        let (train, valid) = dataset::load()
            .shuffle(&mut rand::thread_rng())
            .split_with_ratio(ratio);

        if valid.nsamples() == 0 {
            warn!(holdout_ratio = self.config.holdout_ratio, "Holdout split is empty, skipping evaluation");
            return;
        }

        let model = match fit_model(&train, self.config.max_iterations) {
            Ok(model) => model,
            Err(e) => {
                warn!(error = %e, "Holdout fit failed, skipping evaluation");
                return;
            }
        };

        let predictions = model.predict(&valid);
        match predictions.confusion_matrix(&valid) {
            Ok(cm) => info!(
                accuracy = cm.accuracy(),
                train_samples = train.nsamples(),
                holdout_samples = valid.nsamples(),
                "Holdout evaluation complete"
            ),
            Err(e) => warn!(error = %e, "Holdout evaluation failed"),
        }
    }
}

/// Fit a multinomial logistic regression on `dataset`.
pub fn fit_model(
    dataset: &Dataset<f64, usize, Ix1>,
    max_iterations: u64,
) -> Result<MultiFittedLogisticRegression<f64, usize>> {
    MultiLogisticRegression::default()
        .max_iterations(max_iterations)
        .fit(dataset)
        .context("Failed to fit logistic regression")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_train_produces_complete_artifact() {
        let artifact = Trainer::new(TrainingConfig::default()).train().unwrap();

        assert_eq!(artifact.schema_version, SCHEMA_VERSION);
        assert_eq!(
            artifact.feature_names,
            vec!["sepal_length", "sepal_width", "petal_length", "petal_width"]
        );
        assert_eq!(artifact.class_names, vec!["setosa", "versicolor", "virginica"]);
    }

    #[test]
    fn test_fitted_model_separates_the_training_data() {
        let dataset = dataset::load();
        let model = fit_model(&dataset, 200).unwrap();

        let predictions = model.predict(&dataset);
        let cm = predictions.confusion_matrix(&dataset).unwrap();
        assert!(cm.accuracy() > 0.9);
    }
}
