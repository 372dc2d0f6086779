use clap::Args;

use crate::cli::{or_blank, InteractionArgs, OutputFormat};
use crate::core::interaction::{InteractionResult, Prediction, UpstreamFailure};
use crate::core::types::SeedMatch;
use crate::pipeline;

#[derive(Args)]
pub struct PredictArgs {
    #[command(flatten)]
    pub interaction: InteractionArgs,
}

/// Execute predict subcommand
///
/// # Errors
///
/// Returns an error if inputs cannot be read or a sequence is empty.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: PredictArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let request = args.interaction.request()?;
    let output = args.interaction.tool_output()?;
    let config = args.interaction.ranking.config()?;
    let scorer = args.interaction.ranking.scorer();

    if verbose {
        eprintln!(
            "Query '{}' ({} nt), target '{}' ({} nt)",
            request.query_name,
            request.query.trim().len(),
            request.target_name,
            request.target.trim().len(),
        );
    }

    let prediction = pipeline::run(&request, output, scorer.as_ref(), &config)?;

    match format {
        OutputFormat::Text => print_text_prediction(&prediction),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&prediction)?),
        OutputFormat::Tsv => print_tsv_prediction(&prediction),
    }

    Ok(())
}

pub(crate) fn print_text_prediction(prediction: &Prediction) {
    match prediction {
        Prediction::Failed(failure) => print_text_failure(failure),
        Prediction::Interactions(result) => print_text_result(result),
    }
}

pub(crate) fn print_text_failure(failure: &UpstreamFailure) {
    println!("Prediction failed: {}", failure.error);
    if let Some(code) = failure.exit_code {
        println!("  Exit code: {code}");
    }
    if !failure.stderr.trim().is_empty() {
        println!("  Tool stderr:");
        for line in failure.stderr.lines() {
            println!("    {line}");
        }
    }
}

fn print_text_result(result: &InteractionResult) {
    println!(
        "Interactions: {} vs {}",
        result.query_name, result.target_name
    );
    println!("{}", "=".repeat(60));

    println!(
        "\nGC content: query {:.1}%, target {:.1}%",
        result.gc_content_query * 100.0,
        result.gc_content_target * 100.0
    );
    println!("Seed: {}", describe_seed(&result.seed_features));

    if let Some(note) = &result.note {
        println!("\nNote: {note}");
        return;
    }
    if result.interactions.is_empty() {
        println!("\nNo interactions.");
        return;
    }

    println!(
        "\n{:>4}  {:>8}  {:>11}  {:>11}  {:>6}  {:>8}",
        "Rank", "deltaG", "Query", "Target", "Hybrid", "Score"
    );
    for record in &result.interactions {
        println!(
            "{:>4}  {:>8.2}  {:>11}  {:>11}  {:>6}  {:>8}",
            record.rank,
            record.delta_g,
            format_window(record.query_start, record.query_end),
            format_window(record.target_start, record.target_end),
            or_blank(record.hybrid_length),
            record
                .quality_score
                .map(|s| format!("{s:.4}"))
                .unwrap_or_default(),
        );
    }
}

pub(crate) fn describe_seed(seed: &SeedMatch) -> String {
    match (seed.seed_start_in_first, seed.seed_start_in_second) {
        (Some(query), Some(target)) if seed.has_seed => format!(
            "{} nt at query position {query}, target position {target}",
            seed.length
        ),
        _ => "none".to_string(),
    }
}

fn format_window(start: Option<u64>, end: Option<u64>) -> String {
    match (start, end) {
        (None, None) => String::new(),
        _ => format!("{}-{}", or_blank(start), or_blank(end)),
    }
}

pub(crate) const TSV_HEADER: &str = "rank\tquery_name\ttarget_name\tdeltaG\tquery_start\tquery_end\ttarget_start\ttarget_end\thybrid_length\tquality_score";

fn print_tsv_prediction(prediction: &Prediction) {
    match prediction {
        Prediction::Failed(failure) => {
            println!("error\texit_code");
            println!("{}\t{}", failure.error, or_blank(failure.exit_code));
        }
        Prediction::Interactions(result) => {
            println!("{TSV_HEADER}");
            for line in tsv_rows(result) {
                println!("{line}");
            }
        }
    }
}

/// One TSV line per record, matching [`TSV_HEADER`]
pub(crate) fn tsv_rows(result: &InteractionResult) -> Vec<String> {
    result
        .interactions
        .iter()
        .map(|r| {
            format!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                r.rank,
                r.query_name,
                r.target_name,
                r.delta_g,
                or_blank(r.query_start),
                or_blank(r.query_end),
                or_blank(r.target_start),
                or_blank(r.target_end),
                or_blank(r.hybrid_length),
                or_blank(r.quality_score),
            )
        })
        .collect()
}
