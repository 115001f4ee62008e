//! Feature extraction for Iris classification inference.
//!
//! Transforms incoming measurements into model input vectors. Features are
//! produced in the exact order used during training.

use crate::dataset;
use crate::types::request::IrisMeasurements;

/// Feature extractor that turns measurements into model input features.
///
/// Extraction order must stay in lockstep with `dataset::FEATURE_NAMES`.
pub struct FeatureExtractor;

impl FeatureExtractor {
    /// Create a new feature extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extract the feature vector from a measurement.
    pub fn extract(&self, m: &IrisMeasurements) -> Vec<f64> {
        vec![m.sepal_length, m.sepal_width, m.petal_length, m.petal_width]
    }

    /// Get the number of features produced.
    pub fn feature_count(&self) -> usize {
        dataset::FEATURE_NAMES.len()
    }

    /// Get feature names in extraction order.
    pub fn feature_names(&self) -> Vec<&'static str> {
        dataset::FEATURE_NAMES.to_vec()
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}
