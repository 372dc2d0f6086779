//! Command-line interface for rna-interact.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **predict**: Parse prediction tool output and rank the interactions
//! - **explain**: Rank interactions and explain the top hit
//! - **batch**: Run many query-vs-target predictions from a JSON manifest
//! - **fold**: Parse single-sequence folding output
//!
//! ## Usage
//!
//! ```text
//! # Rank interactions from a saved tool run
//! rna-interact predict --query AUGCUACGUGAAGGCU --target-fasta ompA.fa -t intarna.csv
//!
//! # Pipe the tool straight in
//! IntaRNA -q RybB.fa -t ompA.fa --outMode=C | rna-interact explain --query-fasta RybB.fa --target-fasta ompA.fa -t -
//!
//! # Rerank with a linear quality model, JSON output
//! rna-interact --format json predict --query-fasta RybB.fa --target-fasta ompA.fa -t intarna.csv --model weights.json
//!
//! # Many pairs at once
//! rna-interact batch jobs.json
//! ```

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::matching::seed::{SeedConfig, DEFAULT_SEED_MAX_LEN, DEFAULT_SEED_MIN_LEN};
use crate::parsing::fasta::read_first_sequence;
use crate::parsing::read_text_input;
use crate::pipeline::{
    PipelineConfig, PipelineError, PredictionRequest, ToolOutput, DEFAULT_QUERY_NAME,
    DEFAULT_TARGET_NAME,
};
use crate::ranking::scoring::{ModelFile, ScoringCapability, Unavailable};

pub mod batch;
pub mod explain;
pub mod fold;
pub mod predict;

#[derive(Parser)]
#[command(name = "rna-interact")]
#[command(author = "rna-interact developers")]
#[command(version)]
#[command(about = "Rank and explain sRNA-mRNA interaction predictions")]
#[command(
    long_about = "rna-interact turns the raw output of an RNA-RNA interaction prediction tool into ranked, explained interaction records.\n\nFor each query (sRNA) and target (mRNA) pair it provides:\n- Parsed interaction records with energies, coordinates and hybrid lengths\n- GC content and seed match features for both sequences\n- Optional reranking with a linear quality model\n- A short explanation of why the top interaction ranks first"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse and rank interactions for one query and target
    Predict(predict::PredictArgs),

    /// Rank interactions and explain the top hit
    Explain(explain::ExplainArgs),

    /// Run predictions listed in a JSON manifest
    Batch(batch::BatchArgs),

    /// Parse folding tool output for a single sequence
    Fold(fold::FoldArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Ranking options shared by every pipeline command
#[derive(Args, Debug, Clone)]
pub struct RankingArgs {
    /// Maximum number of interactions to keep
    #[arg(short = 'n', long, default_value = "5")]
    pub max_hits: usize,

    /// Shortest seed window to search for
    #[arg(long, default_value_t = DEFAULT_SEED_MIN_LEN)]
    pub seed_min: usize,

    /// Longest seed window to search for
    #[arg(long, default_value_t = DEFAULT_SEED_MAX_LEN)]
    pub seed_max: usize,

    /// Linear quality model (JSON) used to rerank interactions
    #[arg(long)]
    pub model: Option<PathBuf>,
}

impl RankingArgs {
    /// Build the pipeline configuration from the flags
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::InvalidSeedRange` if the seed bounds are invalid.
    pub fn config(&self) -> Result<PipelineConfig, PipelineError> {
        Ok(PipelineConfig {
            max_hits: self.max_hits,
            seed: SeedConfig::new(self.seed_min, self.seed_max)?,
        })
    }

    /// The scoring capability selected by `--model`
    #[must_use]
    pub fn scorer(&self) -> Box<dyn ScoringCapability> {
        match &self.model {
            Some(path) => Box::new(ModelFile::new(path)),
            None => Box::new(Unavailable),
        }
    }
}

/// Sequences and tool output for a single prediction
#[derive(Args, Debug, Clone)]
pub struct InteractionArgs {
    /// Query (sRNA) sequence
    #[arg(long, required_unless_present = "query_fasta", conflicts_with = "query_fasta")]
    pub query: Option<String>,

    /// FASTA file holding the query sequence (first record is used)
    #[arg(long)]
    pub query_fasta: Option<PathBuf>,

    /// Target (mRNA) sequence
    #[arg(long, required_unless_present = "target_fasta", conflicts_with = "target_fasta")]
    pub target: Option<String>,

    /// FASTA file holding the target sequence (first record is used)
    #[arg(long)]
    pub target_fasta: Option<PathBuf>,

    /// Query name (defaults to the FASTA record name, or "query")
    #[arg(long)]
    pub query_name: Option<String>,

    /// Target name (defaults to the FASTA record name, or "target")
    #[arg(long)]
    pub target_name: Option<String>,

    /// Prediction tool output (semicolon-delimited table)
    /// Use '-' for stdin
    #[arg(short = 't', long, required = true)]
    pub tool_output: PathBuf,

    /// Captured standard error of the prediction tool
    #[arg(long)]
    pub tool_stderr: Option<PathBuf>,

    /// Exit status of the prediction tool; non-zero marks the run as failed
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub exit_code: i32,

    #[command(flatten)]
    pub ranking: RankingArgs,
}

impl InteractionArgs {
    /// Resolve sequences and names into a prediction request
    ///
    /// # Errors
    ///
    /// Returns an error if a FASTA file cannot be read.
    pub fn request(&self) -> anyhow::Result<PredictionRequest> {
        let (query, fasta_query_name) =
            resolve_sequence(self.query.as_deref(), self.query_fasta.as_deref())?;
        let (target, fasta_target_name) =
            resolve_sequence(self.target.as_deref(), self.target_fasta.as_deref())?;

        let query_name = self
            .query_name
            .clone()
            .or(fasta_query_name)
            .unwrap_or_else(|| DEFAULT_QUERY_NAME.to_string());
        let target_name = self
            .target_name
            .clone()
            .or(fasta_target_name)
            .unwrap_or_else(|| DEFAULT_TARGET_NAME.to_string());

        Ok(PredictionRequest::new(query, target)
            .with_names(query_name, target_name)
            .with_max_hits(self.ranking.max_hits))
    }

    /// Read the captured tool output
    ///
    /// # Errors
    ///
    /// Returns an error if the output or stderr file cannot be read.
    pub fn tool_output(&self) -> anyhow::Result<ToolOutput> {
        load_tool_output(&self.tool_output, self.tool_stderr.as_deref(), self.exit_code)
    }
}

/// Sequence given inline or as the first record of a FASTA file
fn resolve_sequence(
    inline: Option<&str>,
    fasta: Option<&Path>,
) -> anyhow::Result<(String, Option<String>)> {
    match (inline, fasta) {
        (Some(sequence), _) => Ok((sequence.to_string(), None)),
        (None, Some(path)) => {
            let record = read_first_sequence(path).map_err(|e| {
                anyhow::anyhow!("Failed to read sequence from {}: {e}", path.display())
            })?;
            Ok((record.sequence, Some(record.name)))
        }
        (None, None) => anyhow::bail!("A sequence or a FASTA file is required"),
    }
}

/// Read tool stdout (and optionally stderr) captured to files
///
/// # Errors
///
/// Returns an error if either file cannot be read.
pub fn load_tool_output(
    stdout_path: &Path,
    stderr_path: Option<&Path>,
    exit_code: i32,
) -> anyhow::Result<ToolOutput> {
    let stdout = read_text_input(stdout_path).map_err(|e| {
        anyhow::anyhow!("Failed to read tool output {}: {e}", stdout_path.display())
    })?;
    let stderr = match stderr_path {
        Some(path) => read_text_input(path).map_err(|e| {
            anyhow::anyhow!("Failed to read tool stderr {}: {e}", path.display())
        })?,
        None => String::new(),
    };
    Ok(ToolOutput::from_exit(exit_code, stdout, stderr))
}

/// Format an optional value for text or TSV output
pub(crate) fn or_blank<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
