use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::types::FeatureVector;

/// A quality-scoring capability consulted once per interaction record.
///
/// Implementations may cache internally but must be safe to share between
/// concurrent pipeline runs.
pub trait ScoringCapability: Send + Sync {
    /// Whether the capability can score at all
    fn is_available(&self) -> bool;

    /// Score a complete feature vector; higher is better
    fn score(&self, features: &FeatureVector) -> Option<f64>;
}

/// No scoring capability; records keep their tool order
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

impl ScoringCapability for Unavailable {
    fn is_available(&self) -> bool {
        false
    }

    fn score(&self, _features: &FeatureVector) -> Option<f64> {
        None
    }
}

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Failed to read model: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse model: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Model weights must be finite")]
    InvalidWeights,
}

/// Per-feature weights of a [`LinearModel`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureWeights {
    #[serde(rename = "deltaG", default)]
    pub delta_g: f64,
    #[serde(default)]
    pub gc_content_query: f64,
    #[serde(default)]
    pub gc_content_target: f64,
    #[serde(default)]
    pub seed_length: f64,
    #[serde(default)]
    pub has_seed: f64,
    #[serde(default)]
    pub hybrid_length: f64,
}

impl FeatureWeights {
    /// Weights in the order given by [`FeatureVector::NAMES`]
    #[must_use]
    pub fn as_array(&self) -> [f64; 6] {
        [
            self.delta_g,
            self.gc_content_query,
            self.gc_content_target,
            self.seed_length,
            self.has_seed,
            self.hybrid_length,
        ]
    }
}

/// Linear quality model: `intercept + Σ weight × feature`
///
/// ```json
/// {
///   "intercept": 0.2,
///   "weights": { "deltaG": -0.05, "has_seed": 0.3, "hybrid_length": 0.01 }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    #[serde(default)]
    pub intercept: f64,
    pub weights: FeatureWeights,
}

impl LinearModel {
    /// Load model coefficients from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Io` if the file cannot be read, `ModelError::Json`
    /// if it is not a valid model, or `ModelError::InvalidWeights` if any
    /// coefficient is not finite.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse model coefficients from a JSON string
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Json` for malformed JSON or
    /// `ModelError::InvalidWeights` for non-finite coefficients.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let model: Self = serde_json::from_str(json)?;
        if !model.intercept.is_finite() || !model.weights.as_array().iter().all(|w| w.is_finite())
        {
            return Err(ModelError::InvalidWeights);
        }
        Ok(model)
    }
}

impl ScoringCapability for LinearModel {
    fn is_available(&self) -> bool {
        true
    }

    fn score(&self, features: &FeatureVector) -> Option<f64> {
        let score = self.intercept
            + self
                .weights
                .as_array()
                .iter()
                .zip(features.as_array())
                .map(|(w, x)| w * x)
                .sum::<f64>();
        score.is_finite().then_some(score)
    }
}

/// A [`LinearModel`] loaded from disk on first use.
///
/// The load outcome is cached; a missing or unreadable file makes the
/// capability unavailable for the lifetime of this value.
#[derive(Debug)]
pub struct ModelFile {
    path: PathBuf,
    model: OnceLock<Option<LinearModel>>,
}

impl ModelFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            model: OnceLock::new(),
        }
    }

    fn model(&self) -> Option<&LinearModel> {
        self.model
            .get_or_init(|| match LinearModel::load(&self.path) {
                Ok(model) => {
                    debug!(path = %self.path.display(), "Loaded scoring model");
                    Some(model)
                }
                Err(e) => {
                    warn!(
                        path = %self.path.display(),
                        error = %e,
                        "Scoring model unavailable, keeping tool order"
                    );
                    None
                }
            })
            .as_ref()
    }
}

impl ScoringCapability for ModelFile {
    fn is_available(&self) -> bool {
        self.model().is_some()
    }

    fn score(&self, features: &FeatureVector) -> Option<f64> {
        self.model()?.score(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn features() -> FeatureVector {
        FeatureVector {
            delta_g: -10.0,
            gc_content_query: 0.5,
            gc_content_target: 0.4,
            seed_length: 7.0,
            has_seed: 1.0,
            hybrid_length: 20.0,
        }
    }

    #[test]
    fn test_unavailable_never_scores() {
        assert!(!Unavailable.is_available());
        assert!(Unavailable.score(&features()).is_none());
    }

    #[test]
    fn test_linear_model_score() {
        let model = LinearModel::from_json(
            r#"{"intercept": 1.0, "weights": {"deltaG": -0.1, "has_seed": 0.5, "hybrid_length": 0.01}}"#,
        )
        .unwrap();
        // 1.0 + (-0.1 * -10.0) + 0.5 * 1.0 + 0.01 * 20.0
        let score = model.score(&features()).unwrap();
        assert!((score - 2.7).abs() < 1e-9);
    }

    #[test]
    fn test_linear_model_missing_weights_default_to_zero() {
        let model = LinearModel::from_json(r#"{"weights": {}}"#).unwrap();
        assert!(model.score(&features()).unwrap().abs() < f64::EPSILON);
    }

    #[test]
    fn test_linear_model_rejects_bad_json() {
        assert!(matches!(
            LinearModel::from_json("not json"),
            Err(ModelError::Json(_))
        ));
    }

    #[test]
    fn test_model_file_loads_lazily() {
        let mut temp = NamedTempFile::with_suffix(".json").unwrap();
        write!(temp, r#"{{"intercept": 0.5, "weights": {{"seed_length": 0.1}}}}"#).unwrap();
        temp.flush().unwrap();

        let model = ModelFile::new(temp.path());
        assert!(model.is_available());
        let score = model.score(&features()).unwrap();
        assert!((score - 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_model_file_missing_is_unavailable() {
        let model = ModelFile::new("/nonexistent/model.json");
        assert!(!model.is_available());
        assert!(model.score(&features()).is_none());
    }

    #[test]
    fn test_model_file_shared_between_threads() {
        let mut temp = NamedTempFile::with_suffix(".json").unwrap();
        write!(temp, r#"{{"weights": {{"hybrid_length": 1.0}}}}"#).unwrap();
        temp.flush().unwrap();

        let model = ModelFile::new(temp.path());
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    assert!((model.score(&features()).unwrap() - 20.0).abs() < 1e-9);
                });
            }
        });
    }
}
