use tracing::debug;

use crate::core::interaction::InteractionRecord;
use crate::core::types::{FeatureVector, PartialFeatures, SeedMatch};
use crate::ranking::scoring::ScoringCapability;

/// Sequence-level features shared by every record of one run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureContext {
    pub gc_content_query: f64,
    pub gc_content_target: f64,
    pub seed: SeedMatch,
}

impl FeatureContext {
    /// Combine run-level features with those of a single record
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Lengths are far below 2^52
    pub fn features_for(&self, record: &InteractionRecord) -> PartialFeatures {
        PartialFeatures {
            delta_g: Some(record.delta_g),
            gc_content_query: Some(self.gc_content_query),
            gc_content_target: Some(self.gc_content_target),
            seed_length: Some(self.seed.length as f64),
            has_seed: Some(if self.seed.has_seed { 1.0 } else { 0.0 }),
            hybrid_length: record.hybrid_length.map(|len| len as f64),
        }
    }
}

/// Score records and move scored ones to the front.
///
/// Records whose feature vector is incomplete are never passed to the scorer
/// and keep `quality_score` absent. Scored records are ordered by descending
/// score; unscored records follow in their original relative order. Ranks are
/// reassigned 1..N over the new order. When nothing could be scored the input
/// order and ranks are returned unchanged.
#[must_use]
pub fn rerank(
    mut records: Vec<InteractionRecord>,
    context: &FeatureContext,
    scorer: &dyn ScoringCapability,
) -> Vec<InteractionRecord> {
    if !scorer.is_available() {
        for record in &mut records {
            record.quality_score = None;
        }
        return records;
    }

    for record in &mut records {
        record.quality_score = match FeatureVector::try_from(context.features_for(record)) {
            Ok(features) => scorer.score(&features),
            Err(e) => {
                debug!(rank = record.rank, error = %e, "Record not scored");
                None
            }
        };
    }

    let (mut scored, unscored): (Vec<_>, Vec<_>) = records
        .into_iter()
        .partition(|record| record.quality_score.is_some());

    if scored.is_empty() {
        return unscored;
    }

    // Stable sort, highest score first
    scored.sort_by(|a, b| {
        let a = a.quality_score.unwrap_or(f64::NEG_INFINITY);
        let b = b.quality_score.unwrap_or(f64::NEG_INFINITY);
        b.total_cmp(&a)
    });

    debug!(
        scored = scored.len(),
        unscored = unscored.len(),
        "Reranked interactions by quality score"
    );

    let mut ranked = scored;
    ranked.extend(unscored);
    for (i, record) in ranked.iter_mut().enumerate() {
        record.rank = i + 1;
    }
    ranked
}
