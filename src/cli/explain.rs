use clap::Args;

use crate::cli::predict::{describe_seed, print_text_failure};
use crate::cli::{or_blank, InteractionArgs, OutputFormat};
use crate::explain::{explain_prediction, ExplainReport, ExplainedResult};
use crate::pipeline;

#[derive(Args)]
pub struct ExplainArgs {
    #[command(flatten)]
    pub interaction: InteractionArgs,
}

/// Execute explain subcommand
///
/// # Errors
///
/// Returns an error if inputs cannot be read or a sequence is empty.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ExplainArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let request = args.interaction.request()?;
    let output = args.interaction.tool_output()?;
    let config = args.interaction.ranking.config()?;
    let scorer = args.interaction.ranking.scorer();

    let prediction = pipeline::run(&request, output, scorer.as_ref(), &config)?;
    let report = explain_prediction(&prediction);

    if verbose {
        if let Some(result) = prediction.result() {
            eprintln!("Explaining {} ranked interactions", result.interactions.len());
        }
    }

    match format {
        OutputFormat::Text => match &report {
            ExplainReport::Failed(failure) => print_text_failure(failure),
            ExplainReport::Explained(explained) => print_text_explanation(explained),
        },
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Tsv => print_tsv_explanation(&report),
    }

    Ok(())
}

fn print_text_explanation(explained: &ExplainedResult) {
    println!(
        "Top interaction: {} vs {}",
        explained.query_name, explained.target_name
    );
    println!("{}", "=".repeat(60));

    if let Some(top) = &explained.top_interaction {
        println!("\nRank {}: deltaG {:.2} kcal/mol", top.rank, top.delta_g);
        if let Some(score) = top.quality_score {
            println!("  Quality score: {score:.4}");
        }
    } else if let Some(note) = &explained.note {
        println!("\nNote: {note}");
    }

    let explain = &explained.explain;
    println!("\nWhy rank 1: {}", explain.why_rank1);
    println!(
        "Seed match: {}",
        if explain.seed_match {
            describe_seed(&explained.seed_features)
        } else {
            "none".to_string()
        }
    );
    println!("Relative affinity: {:.3}", explain.relative_affinity);
}

fn print_tsv_explanation(report: &ExplainReport) {
    match report {
        ExplainReport::Failed(failure) => {
            println!("error\texit_code");
            println!("{}\t{}", failure.error, or_blank(failure.exit_code));
        }
        ExplainReport::Explained(explained) => {
            println!("query_name\ttarget_name\trank1_index\tdeltaG_rank1\trelative_affinity\tseed_match\twhy_rank1");
            let explain = &explained.explain;
            println!(
                "{}\t{}\t{}\t{}\t{:.3}\t{}\t{}",
                explained.query_name,
                explained.target_name,
                or_blank(explain.rank1_index),
                or_blank(explain.delta_g_rank1),
                explain.relative_affinity,
                explain.seed_match,
                explain.why_rank1,
            );
        }
    }
}
