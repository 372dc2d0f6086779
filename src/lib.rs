//! # rna-interact
//!
//! A library for turning sRNA-mRNA interaction predictions into ranked,
//! explained interaction records.
//!
//! Small regulatory RNAs (sRNAs) bind messenger RNAs (mRNAs) through short
//! complementary regions. External prediction tools report candidate binding
//! sites as a semicolon-delimited table, but the raw table says little about
//! which hit is most plausible or why.
//!
//! `rna-interact` parses that table and adds:
//!
//! - **Sequence features**: GC content of both sequences
//! - **Seed detection**: The best short exact match shared by query and target
//! - **Quality reranking**: Optional scoring through an injected capability
//! - **Explanations**: Why the rank-1 interaction sits on top
//!
//! ## Example
//!
//! ```rust
//! use rna_interact::pipeline::{run, PipelineConfig, PredictionRequest, ToolOutput};
//! use rna_interact::ranking::Unavailable;
//! use rna_interact::explain::explain;
//!
//! let output = "id1;start1;end1;id2;start2;end2;hybridDP;E\n\
//!               target;3;14;query;2;13;((((((&))))));-8.2\n\
//!               target;10;18;query;5;12;((((&))));-6.1\n";
//!
//! let request = PredictionRequest::new("AUGCUACGUGAAGGCU", "CUCCGCUUUCACGCGGAUUACG");
//! let prediction = run(
//!     &request,
//!     ToolOutput::completed(output),
//!     &Unavailable,
//!     &PipelineConfig::default(),
//! )
//! .unwrap();
//!
//! let result = prediction.result().unwrap();
//! assert_eq!(result.interactions.len(), 2);
//!
//! let explanation = explain(result);
//! assert_eq!(explanation.delta_g_rank1, Some(-8.2));
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Core data types for records, results and features
//! - [`matching`]: Seed detection between query and target
//! - [`parsing`]: Parsers for tool output, FASTA and fold output
//! - [`ranking`]: Scoring capabilities and stable reranking
//! - [`explain`]: Rank-1 explanations
//! - [`pipeline`]: End-to-end run of one or many predictions
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod explain;
pub mod matching;
pub mod parsing;
pub mod pipeline;
pub mod ranking;

// Re-export commonly used types for convenience
pub use crate::core::interaction::{
    Explanation, InteractionRecord, InteractionResult, Prediction, UpstreamFailure,
};
pub use crate::core::sequence::gc_content;
pub use crate::core::types::*;
pub use explain::{explain, explain_prediction};
pub use matching::find_seed_match;
pub use parsing::interactions::parse_interactions;
pub use pipeline::{run, PipelineConfig, PipelineError, PredictionRequest, ToolOutput};
pub use ranking::{rerank, ScoringCapability};
