//! Rank-1 justification for an interaction result.

use serde::{Deserialize, Serialize};

use crate::core::interaction::{
    Explanation, InteractionRecord, InteractionResult, Prediction, UpstreamFailure,
};
use crate::core::types::SeedMatch;

pub const NO_INTERACTIONS: &str = "no interactions available to explain";

const REASON_LOWEST_ENERGY: &str = "lowest energy among predicted interactions";
const REASON_SEED: &str = "presence of a contiguous seed-like match";
const REASON_COMPACT: &str = "compact hybridization window";
const REASON_FALLBACK: &str = "top rank based on energy and interaction score";

/// Hybrid lengths up to this many positions count as compact
pub const COMPACT_HYBRID_MAX: usize = 25;

/// An interaction result together with the explanation of its top record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainedResult {
    pub query_name: String,
    pub target_name: String,
    pub top_interaction: Option<InteractionRecord>,
    pub explain: Explanation,
    pub gc_content_query: f64,
    pub gc_content_target: f64,
    pub seed_features: SeedMatch,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub raw_stdout: String,
    #[serde(default)]
    pub raw_stderr: String,
}

/// Explanation of a prediction; tool failures pass through unchanged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExplainReport {
    Failed(UpstreamFailure),
    Explained(ExplainedResult),
}

/// Explain a pipeline outcome
#[must_use]
pub fn explain_prediction(prediction: &Prediction) -> ExplainReport {
    match prediction {
        Prediction::Failed(failure) => ExplainReport::Failed(failure.clone()),
        Prediction::Interactions(result) => ExplainReport::Explained(ExplainedResult {
            query_name: result.query_name.clone(),
            target_name: result.target_name.clone(),
            top_interaction: result.top().cloned(),
            explain: explain(result),
            gc_content_query: result.gc_content_query,
            gc_content_target: result.gc_content_target,
            seed_features: result.seed_features,
            note: result.note.clone(),
            raw_stdout: result.raw_stdout.clone(),
            raw_stderr: result.raw_stderr.clone(),
        }),
    }
}

/// Explain why the record at rank 1 is there.
///
/// Relative affinity maps the strongest energy in the set to 1.0 and the
/// weakest to 0.0, and is rounded to 3 decimal places.
#[must_use]
#[allow(clippy::float_cmp)] // Energies are compared against values taken from the same set
pub fn explain(result: &InteractionResult) -> Explanation {
    let Some(top) = result.top() else {
        return Explanation {
            why_rank1: NO_INTERACTIONS.to_string(),
            seed_match: false,
            relative_affinity: 0.0,
            delta_g_rank1: None,
            rank1_index: None,
        };
    };

    let energies = result.interactions.iter().map(|r| r.delta_g);
    let best = energies.clone().fold(f64::INFINITY, f64::min);
    let worst = energies.fold(f64::NEG_INFINITY, f64::max);

    let relative_affinity = if best == worst {
        1.0
    } else {
        ((worst - top.delta_g) / (worst - best)).clamp(0.0, 1.0)
    };

    let seed_match = result.seed_features.has_seed;

    let mut reasons = Vec::new();
    if top.delta_g == best {
        reasons.push(REASON_LOWEST_ENERGY);
    }
    if seed_match {
        reasons.push(REASON_SEED);
    }
    if top
        .hybrid_length
        .is_some_and(|len| len <= COMPACT_HYBRID_MAX)
    {
        reasons.push(REASON_COMPACT);
    }
    if reasons.is_empty() {
        reasons.push(REASON_FALLBACK);
    }

    Explanation {
        why_rank1: reasons.join("; "),
        seed_match,
        relative_affinity: round3(relative_affinity),
        delta_g_rank1: Some(top.delta_g),
        rank1_index: Some(top.rank),
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
