//! Optional quality scoring and stable reranking of interaction records.
//!
//! Scoring is injected through the [`ScoringCapability`] trait rather than
//! loaded globally, so every pipeline run states which scorer it uses:
//!
//! - [`Unavailable`]: No scorer; records keep the tool's order
//! - [`LinearModel`]: Weighted sum over the six scoring features
//! - [`ModelFile`]: A `LinearModel` loaded from disk on first use
//!
//! ## Feature Vector
//!
//! | Feature | Source |
//! |---------|--------|
//! | `deltaG` | Record energy |
//! | `gc_content_query` | GC fraction of the query sequence |
//! | `gc_content_target` | GC fraction of the target sequence |
//! | `seed_length` | Seed length for the run (0 when none) |
//! | `has_seed` | 1.0 when a seed was found, else 0.0 |
//! | `hybrid_length` | Record hybrid length, may be absent |
//!
//! Records with any absent feature are never scored and sort after every
//! scored record.

pub mod rerank;
pub mod scoring;

pub use rerank::{rerank, FeatureContext};
pub use scoring::{LinearModel, ModelError, ModelFile, ScoringCapability, Unavailable};
