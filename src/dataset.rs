//! Access to the bundled Iris dataset.
//!
//! The dataset ships with the training library: 150 samples, 4 numeric
//! features, 3 class labels encoded 0/1/2. The name tables below define the
//! canonical feature order and label encoding used everywhere else.

use linfa::Dataset;
use ndarray::Ix1;

/// Feature names in training order. Inference must assemble its input
/// vectors in exactly this order.
pub const FEATURE_NAMES: [&str; 4] = [
    "sepal_length",
    "sepal_width",
    "petal_length",
    "petal_width",
];

/// Class names indexed by label id.
pub const CLASS_NAMES: [&str; 3] = ["setosa", "versicolor", "virginica"];

/// Load the bundled dataset.
pub fn load() -> Dataset<f64, usize, Ix1> {
    linfa_datasets::iris()
}

/// Name for a class label, if the label is in range.
pub fn class_name(label: usize) -> Option<&'static str> {
    CLASS_NAMES.get(label).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use linfa::prelude::*;

    #[test]
    fn test_dataset_shape() {
        let dataset = load();
        assert_eq!(dataset.nsamples(), 150);
        assert_eq!(dataset.nfeatures(), FEATURE_NAMES.len());
    }

    #[test]
    fn test_labels_are_in_range() {
        let dataset = load();
        assert!(dataset.targets().iter().all(|&label| label < CLASS_NAMES.len()));
    }

    #[test]
    fn test_all_classes_present() {
        let dataset = load();
        for label in 0..CLASS_NAMES.len() {
            assert!(dataset.targets().iter().any(|&t| t == label));
        }
    }

    #[test]
    fn test_class_name_lookup() {
        assert_eq!(class_name(0), Some("setosa"));
        assert_eq!(class_name(2), Some("virginica"));
        assert_eq!(class_name(3), None);
    }
}
