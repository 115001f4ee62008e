//! Model artifact persistence.
//!
//! The trainer writes the fitted model to disk as a versioned binary blob;
//! the service reads it back exactly once at startup. Retraining overwrites
//! the artifact wholesale, there is no backup and no migration.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use linfa_logistic::MultiFittedLogisticRegression;
use serde::{Deserialize, Serialize};

/// Bumped whenever the serialized layout changes. `load` rejects anything
/// else.
pub const SCHEMA_VERSION: u32 = 1;

/// Serialized form of the fitted classifier plus the metadata the service
/// needs to interpret it: feature order and class encoding.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub schema_version: u32,

    /// Feature names in training order
    pub feature_names: Vec<String>,

    /// Class names indexed by label id
    pub class_names: Vec<String>,

    /// When the model was fitted
    pub trained_at: DateTime<Utc>,

    /// The fitted multinomial logistic regression
    pub model: MultiFittedLogisticRegression<f64, usize>,
}

/// Write the artifact to `path`, creating the containing directory if absent.
pub fn save(artifact: &ModelArtifact, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create artifact directory {}", parent.display())
            })?;
        }
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create artifact file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    bincode::serialize_into(&mut writer, artifact).context("Failed to serialize model artifact")?;
    writer.flush().context("Failed to flush model artifact")?;
    Ok(())
}

/// Read an artifact back from `path`, rejecting unknown schema versions.
pub fn load(path: &Path) -> Result<ModelArtifact> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open artifact file {}", path.display()))?;
    let reader = BufReader::new(file);
    let artifact: ModelArtifact =
        bincode::deserialize_from(reader).context("Failed to deserialize model artifact")?;

    if artifact.schema_version != SCHEMA_VERSION {
        bail!(
            "Artifact schema version mismatch: expected {SCHEMA_VERSION}, found {}",
            artifact.schema_version
        );
    }

    Ok(artifact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrainingConfig;
    use crate::models::trainer::Trainer;
    use linfa::prelude::*;
    use ndarray::Array2;

    fn test_artifact() -> ModelArtifact {
        Trainer::new(TrainingConfig::default()).train().unwrap()
    }

    #[test]
    fn test_save_load_roundtrip_preserves_predictions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("iris.model");

        let artifact = test_artifact();
        let x = Array2::from_shape_vec((1, 4), vec![5.1, 3.5, 1.4, 0.2]).unwrap();
        let before = artifact.model.predict(&x);

        save(&artifact, &path).unwrap();
        let restored = load(&path).unwrap();

        assert_eq!(restored.schema_version, SCHEMA_VERSION);
        assert_eq!(restored.feature_names, artifact.feature_names);
        assert_eq!(restored.class_names, artifact.class_names);
        assert_eq!(restored.model.predict(&x), before);
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("dir").join("iris.model");

        save(&test_artifact(), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(load(Path::new("no/such/artifact.model")).is_err());
    }

    #[test]
    fn test_load_corrupt_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.model");
        std::fs::write(&path, b"definitely not a model artifact").unwrap();

        assert!(load(&path).is_err());
    }

    #[test]
    fn test_load_rejects_wrong_schema_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("old.model");

        let mut artifact = test_artifact();
        artifact.schema_version = 999;
        save(&artifact, &path).unwrap();

        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("schema version"));
    }
}
