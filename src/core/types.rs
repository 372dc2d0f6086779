use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which of the two input sequences a value refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// The sRNA sequence
    Query,
    /// The mRNA sequence
    Target,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Query => write!(f, "query"),
            Self::Target => write!(f, "target"),
        }
    }
}

/// Best exact contiguous match between two sequences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedMatch {
    pub has_seed: bool,

    /// Seed length, 0 when no seed was found
    pub length: usize,

    /// 1-based start of the seed in the first sequence
    pub seed_start_in_first: Option<usize>,

    /// 1-based start of the seed in the second sequence
    pub seed_start_in_second: Option<usize>,
}

impl SeedMatch {
    #[must_use]
    pub fn none() -> Self {
        Self {
            has_seed: false,
            length: 0,
            seed_start_in_first: None,
            seed_start_in_second: None,
        }
    }

    #[must_use]
    pub fn found(length: usize, start_in_first: usize, start_in_second: usize) -> Self {
        Self {
            has_seed: true,
            length,
            seed_start_in_first: Some(start_in_first),
            seed_start_in_second: Some(start_in_second),
        }
    }
}

impl Default for SeedMatch {
    fn default() -> Self {
        Self::none()
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FeatureError {
    #[error("Missing scoring feature: {0}")]
    Missing(&'static str),
}

/// Feature values for one record, any of which may be absent
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PartialFeatures {
    pub delta_g: Option<f64>,
    pub gc_content_query: Option<f64>,
    pub gc_content_target: Option<f64>,
    pub seed_length: Option<f64>,
    pub has_seed: Option<f64>,
    pub hybrid_length: Option<f64>,
}

/// Complete feature vector handed to a scoring capability.
///
/// Can only be built when every component is present, so a scorer never
/// sees a partially filled vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    #[serde(rename = "deltaG")]
    pub delta_g: f64,
    pub gc_content_query: f64,
    pub gc_content_target: f64,
    pub seed_length: f64,
    /// 1.0 when a seed was found, 0.0 otherwise
    pub has_seed: f64,
    pub hybrid_length: f64,
}

impl FeatureVector {
    /// Feature names in scoring order
    pub const NAMES: [&'static str; 6] = [
        "deltaG",
        "gc_content_query",
        "gc_content_target",
        "seed_length",
        "has_seed",
        "hybrid_length",
    ];

    /// Values in the order given by [`FeatureVector::NAMES`]
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

impl TryFrom<PartialFeatures> for FeatureVector {
    type Error = FeatureError;

    fn try_from(partial: PartialFeatures) -> Result<Self, Self::Error> {
        Ok(Self {
            delta_g: partial.delta_g.ok_or(FeatureError::Missing("deltaG"))?,
            gc_content_query: partial
                .gc_content_query
                .ok_or(FeatureError::Missing("gc_content_query"))?,
            gc_content_target: partial
                .gc_content_target
                .ok_or(FeatureError::Missing("gc_content_target"))?,
            seed_length: partial
                .seed_length
                .ok_or(FeatureError::Missing("seed_length"))?,
            has_seed: partial.has_seed.ok_or(FeatureError::Missing("has_seed"))?,
            hybrid_length: partial
                .hybrid_length
                .ok_or(FeatureError::Missing("hybrid_length"))?,
        })
    }
}
