//! End-to-end run of one query-vs-target prediction.
//!
//! Stages run strictly forward:
//!
//! 1. Validate and trim both sequences
//! 2. Compute GC content for each side and the seed match between them
//! 3. Parse the prediction tool output into provisionally ranked records
//! 4. Score and rerank records with the injected scoring capability
//!
//! A failed tool run is passed through verbatim without touching any of the
//! stages after input validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::core::interaction::{InteractionResult, Prediction, UpstreamFailure};
use crate::core::sequence::gc_content;
use crate::core::types::Side;
use crate::matching::seed::{find_seed_match_with, SeedConfig, SeedRangeError};
use crate::parsing::interactions::parse_interactions;
use crate::ranking::rerank::{rerank, FeatureContext};
use crate::ranking::scoring::ScoringCapability;

/// Default number of interactions kept per run
pub const DEFAULT_MAX_HITS: usize = 5;

pub const DEFAULT_QUERY_NAME: &str = "query";
pub const DEFAULT_TARGET_NAME: &str = "target";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PipelineError {
    #[error("The {side} sequence must be non-empty")]
    EmptySequence { side: Side },

    #[error(transparent)]
    InvalidSeedRange(#[from] SeedRangeError),
}

/// Pipeline configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Default bound on accepted records for requests that do not set one
    pub max_hits: usize,
    pub seed: SeedConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_hits: DEFAULT_MAX_HITS,
            seed: SeedConfig::default(),
        }
    }
}

fn default_query_name() -> String {
    DEFAULT_QUERY_NAME.to_string()
}

fn default_target_name() -> String {
    DEFAULT_TARGET_NAME.to_string()
}

fn default_max_hits() -> usize {
    DEFAULT_MAX_HITS
}

/// One query-vs-target prediction request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRequest {
    /// sRNA sequence
    #[serde(alias = "srna")]
    pub query: String,

    /// mRNA sequence
    #[serde(alias = "mrna")]
    pub target: String,

    #[serde(default = "default_query_name", alias = "srna_name")]
    pub query_name: String,

    #[serde(default = "default_target_name", alias = "mrna_name")]
    pub target_name: String,

    #[serde(default = "default_max_hits")]
    pub max_hits: usize,
}

impl PredictionRequest {
    pub fn new(query: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            target: target.into(),
            query_name: default_query_name(),
            target_name: default_target_name(),
            max_hits: DEFAULT_MAX_HITS,
        }
    }

    #[must_use]
    pub fn with_names(mut self, query_name: impl Into<String>, target_name: impl Into<String>) -> Self {
        self.query_name = query_name.into();
        self.target_name = target_name.into();
        self
    }

    #[must_use]
    pub fn with_max_hits(mut self, max_hits: usize) -> Self {
        self.max_hits = max_hits;
        self
    }
}

/// What the external prediction tool produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutput {
    Completed { stdout: String, stderr: String },
    Failed(UpstreamFailure),
}

impl ToolOutput {
    pub fn completed(stdout: impl Into<String>) -> Self {
        Self::Completed {
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Classify a finished tool process by its exit code
    pub fn from_exit(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        if exit_code == 0 {
            Self::Completed {
                stdout: stdout.into(),
                stderr: stderr.into(),
            }
        } else {
            Self::Failed(UpstreamFailure {
                error: "prediction tool exited with non-zero status".to_string(),
                exit_code: Some(exit_code),
                stdout: stdout.into(),
                stderr: stderr.into(),
            })
        }
    }
}

/// Run the pipeline for one request.
///
/// # Errors
///
/// Returns `PipelineError::EmptySequence` if either sequence is empty after
/// trimming. Tool failures are not errors: they come back as
/// [`Prediction::Failed`].
pub fn run(
    request: &PredictionRequest,
    output: ToolOutput,
    scorer: &dyn ScoringCapability,
    config: &PipelineConfig,
) -> Result<Prediction, PipelineError> {
    let query = request.query.trim();
    let target = request.target.trim();
    if query.is_empty() {
        return Err(PipelineError::EmptySequence { side: Side::Query });
    }
    if target.is_empty() {
        return Err(PipelineError::EmptySequence { side: Side::Target });
    }

    let (stdout, stderr) = match output {
        ToolOutput::Completed { stdout, stderr } => (stdout, stderr),
        ToolOutput::Failed(failure) => {
            debug!(error = %failure.error, "Prediction tool failed, passing failure through");
            return Ok(Prediction::Failed(failure));
        }
    };

    let context = FeatureContext {
        gc_content_query: gc_content(query),
        gc_content_target: gc_content(target),
        seed: find_seed_match_with(query, target, &config.seed),
    };
    debug!(
        gc_query = context.gc_content_query,
        gc_target = context.gc_content_target,
        seed_length = context.seed.length,
        "Computed sequence features"
    );

    let stdout = stdout.trim();
    let parsed = parse_interactions(
        stdout,
        &request.query_name,
        &request.target_name,
        request.max_hits,
    );
    debug!(records = parsed.records.len(), "Parsed interaction records");

    let interactions = rerank(parsed.records, &context, scorer);

    Ok(Prediction::Interactions(InteractionResult {
        query_name: request.query_name.clone(),
        target_name: request.target_name.clone(),
        interactions,
        gc_content_query: context.gc_content_query,
        gc_content_target: context.gc_content_target,
        seed_features: context.seed,
        note: parsed.note,
        raw_stdout: stdout.to_string(),
        raw_stderr: stderr.trim().to_string(),
    }))
}

/// Result of one batch job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BatchEntry {
    Completed(Prediction),
    Rejected { error: String },
}

/// Results of a batch, in request order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub count: usize,
    pub generated_at: String,
    pub results: Vec<BatchEntry>,
}

/// Run independent jobs; an invalid request is reported in place and does not
/// stop the batch.
#[must_use]
pub fn run_batch(
    jobs: Vec<(PredictionRequest, ToolOutput)>,
    scorer: &dyn ScoringCapability,
    config: &PipelineConfig,
) -> BatchReport {
    let results: Vec<BatchEntry> = jobs
        .into_iter()
        .map(|(request, output)| match run(&request, output, scorer, config) {
            Ok(prediction) => BatchEntry::Completed(prediction),
            Err(e) => {
                debug!(query = %request.query_name, error = %e, "Rejected batch request");
                BatchEntry::Rejected {
                    error: e.to_string(),
                }
            }
        })
        .collect();

    BatchReport {
        count: results.len(),
        generated_at: chrono::Utc::now().to_rfc3339(),
        results,
    }
}
