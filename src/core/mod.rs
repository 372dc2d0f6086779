//! Core data types for interaction ranking.
//!
//! This module provides the value types shared by every stage of the pipeline:
//!
//! - [`SeedMatch`]: Best exact contiguous match between query and target
//! - [`FeatureVector`]: The complete feature set handed to a scoring capability
//! - [`InteractionRecord`]: One predicted interaction parsed from tool output
//! - [`InteractionResult`]: All records of a single query-vs-target run
//! - [`Prediction`], [`UpstreamFailure`]: Outcome of a run, including tool failures
//! - [`Explanation`]: Justification for the rank-1 record
//!
//! ## Coordinates
//!
//! All positions are 1-based, matching the convention of the prediction tool output.
//!
//! | Field | Meaning |
//! |-------|---------|
//! | `query_start` / `query_end` | Interaction window on the sRNA (query) |
//! | `target_start` / `target_end` | Interaction window on the mRNA (target) |
//! | `seed_start_in_first` | Seed start on the first (query) sequence |
//! | `seed_start_in_second` | Seed start on the second (target) sequence |

pub mod interaction;
pub mod sequence;
pub mod types;
