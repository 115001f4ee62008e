//! Prediction request data structures

use serde::{Deserialize, Serialize};

/// A single Iris measurement to classify.
///
/// All four fields are required; there is no range validation beyond the
/// type. Field order mirrors the feature order used during training.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IrisMeasurements {
    /// Sepal length in centimeters
    pub sepal_length: f64,

    /// Sepal width in centimeters
    pub sepal_width: f64,

    /// Petal length in centimeters
    pub petal_length: f64,

    /// Petal width in centimeters
    pub petal_width: f64,
}
