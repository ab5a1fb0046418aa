//! Trained model artifacts loaded once at startup
//!
//! The store holds the growth stage classifier, the yield regressor and the
//! categorical label encoders, read from JSON files under a configured
//! directory. Everything is validated eagerly so the process refuses to
//! serve with a missing or inconsistent model, and prediction itself never
//! fails.

mod classifier;
mod encoders;
mod regressor;

pub use classifier::KnnClassifier;
pub use encoders::{LabelEncoder, LabelEncoderSet};
pub use regressor::{Activation, DenseLayer, MlpRegressor};

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

/// File names looked up inside the artifact directory
pub const CLASSIFIER_FILE: &str = "growth_classifier.json";
pub const REGRESSOR_FILE: &str = "yield_regressor.json";
pub const ENCODERS_FILE: &str = "label_encoders.json";

/// Number of features the growth stage classifier consumes
pub const GROWTH_FEATURES: usize = 6;

/// Number of features the yield regressor consumes
pub const YIELD_FEATURES: usize = 9;

/// Failure to bring up the artifact store. Always fatal at startup.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("missing model artifact: {path}")]
    Missing { path: PathBuf },

    #[error("could not read model artifact {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse model artifact {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid model artifact {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },
}

/// Immutable bundle of everything the prediction pipeline needs
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    pub classifier: KnnClassifier,
    pub regressor: MlpRegressor,
    pub encoders: LabelEncoderSet,
}

impl ArtifactStore {
    /// Load and validate all model artifacts from `dir`.
    pub fn load(dir: &Path) -> Result<Self, ArtifactError> {
        let path = dir.join(CLASSIFIER_FILE);
        let classifier: KnnClassifier = read_json(&path)?;
        classifier
            .validate(GROWTH_FEATURES)
            .map_err(|reason| ArtifactError::Invalid { path, reason })?;

        let path = dir.join(REGRESSOR_FILE);
        let regressor: MlpRegressor = read_json(&path)?;
        regressor
            .validate(YIELD_FEATURES)
            .map_err(|reason| ArtifactError::Invalid { path, reason })?;

        let path = dir.join(ENCODERS_FILE);
        let encoders: LabelEncoderSet = read_json(&path)?;
        encoders
            .validate()
            .map_err(|reason| ArtifactError::Invalid { path, reason })?;

        Ok(ArtifactStore {
            classifier,
            regressor,
            encoders,
        })
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(source) if source.kind() == ErrorKind::NotFound => {
            return Err(ArtifactError::Missing {
                path: path.to_path_buf(),
            })
        }
        Err(source) => {
            return Err(ArtifactError::Unreadable {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write_valid_artifacts(dir: &Path) {
        fs::write(
            dir.join(CLASSIFIER_FILE),
            json!({
                "k": 1,
                "points": [[50.0, 20.0, 8.0, 60.0, 80.0, 6.5]],
                "targets": [40.0]
            })
            .to_string(),
        )
        .unwrap();
        fs::write(
            dir.join(REGRESSOR_FILE),
            json!({
                "layers": [{
                    "weights": [[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]],
                    "biases": [1000.0],
                    "activation": "identity"
                }]
            })
            .to_string(),
        )
        .unwrap();
        fs::write(
            dir.join(ENCODERS_FILE),
            json!({
                "Crop_Type": { "classes": ["Rice", "Wheat"] },
                "Soil_Type": { "classes": ["Clay", "Loamy"] }
            })
            .to_string(),
        )
        .unwrap();
    }

    #[test]
    fn test_load_valid_store() {
        let dir = TempDir::new().unwrap();
        write_valid_artifacts(dir.path());

        let store = ArtifactStore::load(dir.path()).unwrap();
        assert_eq!(store.classifier.k, 1);
        assert_eq!(store.encoders.crop_type.transform("Wheat"), Some(1));
    }

    #[test]
    fn test_missing_file_names_the_path() {
        let dir = TempDir::new().unwrap();
        write_valid_artifacts(dir.path());
        fs::remove_file(dir.path().join(REGRESSOR_FILE)).unwrap();

        let err = ArtifactStore::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains(REGRESSOR_FILE), "{err}");
    }

    #[test]
    fn test_malformed_json_rejected() {
        let dir = TempDir::new().unwrap();
        write_valid_artifacts(dir.path());
        fs::write(dir.path().join(CLASSIFIER_FILE), "not json").unwrap();

        assert!(matches!(
            ArtifactStore::load(dir.path()),
            Err(ArtifactError::Malformed { .. })
        ));
    }

    #[test]
    fn test_wrong_feature_count_rejected() {
        let dir = TempDir::new().unwrap();
        write_valid_artifacts(dir.path());
        fs::write(
            dir.path().join(CLASSIFIER_FILE),
            json!({
                "k": 1,
                "points": [[1.0, 2.0]],
                "targets": [40.0]
            })
            .to_string(),
        )
        .unwrap();

        assert!(matches!(
            ArtifactStore::load(dir.path()),
            Err(ArtifactError::Invalid { .. })
        ));
    }
}
