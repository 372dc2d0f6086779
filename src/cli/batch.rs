use std::path::{Path, PathBuf};

use clap::Args;
use serde::Deserialize;
use tracing::warn;

use crate::cli::predict::{tsv_rows, TSV_HEADER};
use crate::cli::{load_tool_output, or_blank, OutputFormat, RankingArgs};
use crate::core::interaction::{Prediction, UpstreamFailure};
use crate::parsing::read_text_input;
use crate::pipeline::{
    run_batch, BatchEntry, BatchReport, PipelineConfig, PredictionRequest, ToolOutput,
    DEFAULT_QUERY_NAME, DEFAULT_TARGET_NAME,
};

#[derive(Args)]
pub struct BatchArgs {
    /// JSON manifest listing the jobs to run
    /// Use '-' for stdin
    #[arg(required = true)]
    pub manifest: PathBuf,

    #[command(flatten)]
    pub ranking: RankingArgs,
}

/// One manifest entry
///
/// ```json
/// [
///   {
///     "query": "AUGCUACGUGAAGGCU",
///     "target": "CUCCGCUUUCACGCGGAUUACG",
///     "query_name": "RybB",
///     "tool_output": "runs/rybb_ompa.csv",
///     "exit_code": 0
///   }
/// ]
/// ```
///
/// Relative paths are resolved against the manifest's directory.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchJob {
    #[serde(alias = "srna")]
    pub query: String,

    #[serde(alias = "mrna")]
    pub target: String,

    #[serde(default, alias = "srna_name")]
    pub query_name: Option<String>,

    #[serde(default, alias = "mrna_name")]
    pub target_name: Option<String>,

    /// Overrides `--max-hits` for this job
    #[serde(default)]
    pub max_hits: Option<usize>,

    pub tool_output: PathBuf,

    #[serde(default)]
    pub tool_stderr: Option<PathBuf>,

    #[serde(default)]
    pub exit_code: i32,
}

impl BatchJob {
    fn request(&self, config: &PipelineConfig) -> PredictionRequest {
        PredictionRequest::new(self.query.clone(), self.target.clone())
            .with_names(
                self.query_name
                    .clone()
                    .unwrap_or_else(|| DEFAULT_QUERY_NAME.to_string()),
                self.target_name
                    .clone()
                    .unwrap_or_else(|| DEFAULT_TARGET_NAME.to_string()),
            )
            .with_max_hits(self.max_hits.unwrap_or(config.max_hits))
    }

    fn tool_output(&self, base: &Path) -> anyhow::Result<ToolOutput> {
        let stderr = self.tool_stderr.as_ref().map(|p| base.join(p));
        load_tool_output(&base.join(&self.tool_output), stderr.as_deref(), self.exit_code)
    }

    /// Tool output for this job; a read error fails only this job
    fn tool_output_or_failure(&self, base: &Path) -> ToolOutput {
        self.tool_output(base).unwrap_or_else(|e| {
            warn!(error = %e, "Batch job tool output unavailable");
            ToolOutput::Failed(UpstreamFailure {
                error: e.to_string(),
                exit_code: None,
                stdout: String::new(),
                stderr: String::new(),
            })
        })
    }
}

/// Parse a manifest into jobs
///
/// # Errors
///
/// Returns an error if the manifest is not a JSON array of jobs.
pub fn parse_manifest(text: &str) -> anyhow::Result<Vec<BatchJob>> {
    serde_json::from_str(text).map_err(|e| anyhow::anyhow!("Invalid batch manifest: {e}"))
}

/// Execute batch subcommand
///
/// # Errors
///
/// Returns an error if the manifest cannot be read or parsed. Unreadable tool
/// output only fails the job that names it.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: BatchArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = args.ranking.config()?;
    let scorer = args.ranking.scorer();

    let text = read_text_input(&args.manifest).map_err(|e| {
        anyhow::anyhow!("Failed to read manifest {}: {e}", args.manifest.display())
    })?;
    let jobs = parse_manifest(&text)?;

    // Paths in a manifest read from stdin are relative to the working directory
    let base = args
        .manifest
        .parent()
        .filter(|_| args.manifest.as_os_str() != "-")
        .map_or_else(PathBuf::new, Path::to_path_buf);

    if verbose {
        eprintln!("Loaded {} jobs from {}", jobs.len(), args.manifest.display());
    }

    let inputs = jobs
        .iter()
        .map(|job| (job.request(&config), job.tool_output_or_failure(&base)))
        .collect();

    let report = run_batch(inputs, scorer.as_ref(), &config);

    match format {
        OutputFormat::Text => print_text_report(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Tsv => print_tsv_report(&report),
    }

    Ok(())
}

fn print_text_report(report: &BatchReport) {
    println!("Batch Results ({} jobs)", report.count);
    println!("{}", "=".repeat(60));

    for (i, entry) in report.results.iter().enumerate() {
        match entry {
            BatchEntry::Completed(Prediction::Interactions(result)) => {
                let top = result.top().map_or_else(
                    || "no interactions".to_string(),
                    |r| format!("top deltaG {:.2}", r.delta_g),
                );
                println!(
                    "\n#{}: {} vs {}: {} interactions, {top}",
                    i + 1,
                    result.query_name,
                    result.target_name,
                    result.interactions.len(),
                );
                if let Some(note) = &result.note {
                    println!("  Note: {note}");
                }
            }
            BatchEntry::Completed(Prediction::Failed(failure)) => {
                println!("\n#{}: prediction failed: {}", i + 1, failure.error);
            }
            BatchEntry::Rejected { error } => {
                println!("\n#{}: rejected: {error}", i + 1);
            }
        }
    }
}

fn print_tsv_report(report: &BatchReport) {
    println!("job\tstatus\t{TSV_HEADER}");
    for (i, entry) in report.results.iter().enumerate() {
        let job = i + 1;
        match entry {
            BatchEntry::Completed(Prediction::Interactions(result)) => {
                for row in tsv_rows(result) {
                    println!("{job}\tok\t{row}");
                }
            }
            BatchEntry::Completed(Prediction::Failed(failure)) => {
                println!("{job}\tfailed\t{}", or_blank(failure.exit_code));
            }
            BatchEntry::Rejected { .. } => println!("{job}\trejected"),
        }
    }
}
