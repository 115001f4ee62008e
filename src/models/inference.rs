//! Inference over the loaded model artifact.

use anyhow::{bail, Result};
use linfa::prelude::*;
use ndarray::Array2;

use crate::models::artifact::ModelArtifact;

/// Result of classifying a single measurement.
#[derive(Debug, Clone)]
pub struct Prediction {
    /// Predicted class label (0, 1 or 2)
    pub class: usize,
    /// Human-readable name of the predicted class
    pub class_name: String,
    /// Max class probability, rounded to 4 decimal places
    pub confidence: f64,
    /// Full class-probability vector, unrounded
    pub probabilities: Vec<f64>,
}

/// Inference engine over a model loaded once at startup.
///
/// Nothing is mutated after construction, so a shared reference can serve
/// concurrent callers without locking.
pub struct InferenceEngine {
    artifact: ModelArtifact,
}

impl InferenceEngine {
    /// Create an engine from a loaded artifact.
    pub fn new(artifact: ModelArtifact) -> Self {
        Self { artifact }
    }

    /// Number of features the model expects.
    pub fn feature_count(&self) -> usize {
        self.artifact.feature_names.len()
    }

    /// Class names indexed by label id.
    pub fn class_names(&self) -> &[String] {
        &self.artifact.class_names
    }

    /// Classify one feature vector given in training feature order.
    pub fn predict(&self, features: &[f64]) -> Result<Prediction> {
        if features.len() != self.feature_count() {
            bail!(
                "Expected {} features, got {}",
                self.feature_count(),
                features.len()
            );
        }

        // one row, training feature order
        let x = Array2::from_shape_vec((1, features.len()), features.to_vec())?;

        let probabilities = self.artifact.model.predict_probabilities(&x);
        let class = self.artifact.model.predict(&x)[0];
        let confidence = probabilities
            .row(0)
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);

        let class_name = self
            .artifact
            .class_names
            .get(class)
            .cloned()
            .unwrap_or_else(|| class.to_string());

        Ok(Prediction {
            class,
            class_name,
            confidence: round_confidence(confidence),
            probabilities: probabilities.row(0).to_vec(),
        })
    }
}

/// Round to the 4 decimal places reported to clients.
pub fn round_confidence(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrainingConfig;
    use crate::models::trainer::Trainer;

    fn test_engine() -> InferenceEngine {
        let artifact = Trainer::new(TrainingConfig::default()).train().unwrap();
        InferenceEngine::new(artifact)
    }

    #[test]
    fn test_setosa_sample_is_class_0() {
        let prediction = test_engine().predict(&[5.1, 3.5, 1.4, 0.2]).unwrap();

        assert_eq!(prediction.class, 0);
        assert_eq!(prediction.class_name, "setosa");
        assert!(prediction.confidence > 0.9);
    }

    #[test]
    fn test_virginica_sample_is_class_2() {
        let prediction = test_engine().predict(&[6.7, 3.0, 5.2, 2.3]).unwrap();

        assert_eq!(prediction.class, 2);
        assert_eq!(prediction.class_name, "virginica");
        assert!(prediction.confidence > 0.9);
    }

    #[test]
    fn test_confidence_is_rounded_and_bounded() {
        let engine = test_engine();
        let samples: [[f64; 4]; 3] = [
            [5.1, 3.5, 1.4, 0.2],
            [6.0, 2.9, 4.5, 1.5],
            [6.7, 3.0, 5.2, 2.3],
        ];

        for features in samples {
            let prediction = engine.predict(&features).unwrap();
            assert!((0.0..=1.0).contains(&prediction.confidence));
            // rounded to exactly 4 decimal places
            let scaled = prediction.confidence * 10_000.0;
            assert!((scaled - scaled.round()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let prediction = test_engine().predict(&[6.0, 2.9, 4.5, 1.5]).unwrap();

        assert_eq!(prediction.probabilities.len(), 3);
        let sum: f64 = prediction.probabilities.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_wrong_feature_count_is_rejected() {
        let engine = test_engine();
        assert!(engine.predict(&[5.1, 3.5, 1.4]).is_err());
        assert!(engine.predict(&[5.1, 3.5, 1.4, 0.2, 9.9]).is_err());
    }

    #[test]
    fn test_round_confidence() {
        assert_eq!(round_confidence(0.98765), 0.9877);
        assert_eq!(round_confidence(0.12344), 0.1234);
        assert_eq!(round_confidence(1.0), 1.0);
        assert_eq!(round_confidence(0.0), 0.0);
    }
}
