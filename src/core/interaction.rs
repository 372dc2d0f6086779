use serde::{Deserialize, Serialize};

use crate::core::types::SeedMatch;

/// One predicted interaction between a query and a target sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionRecord {
    /// Position in ranked order, starting at 1
    pub rank: usize,

    pub query_name: String,

    pub target_name: String,

    /// Predicted free energy (kcal/mol); more negative is stronger
    #[serde(rename = "deltaG")]
    pub delta_g: f64,

    pub query_start: Option<u64>,

    pub query_end: Option<u64>,

    pub target_start: Option<u64>,

    pub target_end: Option<u64>,

    /// Paired positions in the hybridization descriptor
    pub hybrid_length: Option<usize>,

    /// Score from the scoring capability, absent when not scored
    pub quality_score: Option<f64>,

    /// Source row as read from the tool output
    pub raw_row: String,
}

/// All interactions predicted for one query-vs-target run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionResult {
    pub query_name: String,

    pub target_name: String,

    /// Records in ranked order
    pub interactions: Vec<InteractionRecord>,

    pub gc_content_query: f64,

    pub gc_content_target: f64,

    /// Seed match between the full query and target sequences
    pub seed_features: SeedMatch,

    /// Set when the tool produced no usable rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    #[serde(default)]
    pub raw_stdout: String,

    #[serde(default)]
    pub raw_stderr: String,
}

impl InteractionResult {
    /// The record currently at rank 1
    #[must_use]
    pub fn top(&self) -> Option<&InteractionRecord> {
        self.interactions.first()
    }
}

/// The external prediction tool failed; carried through the pipeline verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamFailure {
    pub error: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,

    #[serde(default)]
    pub stdout: String,

    #[serde(default)]
    pub stderr: String,
}

/// Outcome of a single pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Prediction {
    /// The prediction tool failed; no interaction data was synthesized
    Failed(UpstreamFailure),
    Interactions(InteractionResult),
}

impl Prediction {
    #[must_use]
    pub fn result(&self) -> Option<&InteractionResult> {
        match self {
            Self::Interactions(result) => Some(result),
            Self::Failed(_) => None,
        }
    }
}

/// Why the rank-1 record is where it is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub why_rank1: String,

    /// Whether the query and target share a seed-like match
    pub seed_match: bool,

    /// Energy of the top record normalized to [0, 1] within the result set
    pub relative_affinity: f64,

    #[serde(rename = "deltaG_rank1")]
    pub delta_g_rank1: Option<f64>,

    pub rank1_index: Option<usize>,
}
