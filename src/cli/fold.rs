use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::parsing::fold::{parse_fold_output, FoldResult};
use crate::parsing::read_text_input;

#[derive(Args)]
pub struct FoldArgs {
    /// Folding tool output (name, sequence and structure lines)
    /// Use '-' for stdin
    #[arg(required = true)]
    pub input: PathBuf,
}

/// Execute fold subcommand
///
/// # Errors
///
/// Returns an error if the input cannot be read or is not valid fold output.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: FoldArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let text = read_text_input(&args.input)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", args.input.display()))?;
    let fold = parse_fold_output(&text)?;

    if verbose {
        eprintln!("Parsed fold of '{}' ({} nt)", fold.name, fold.sequence.len());
    }

    match format {
        OutputFormat::Text => print_text_fold(&fold),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&fold)?),
        OutputFormat::Tsv => {
            println!("name\tsequence\tstructure\tmfe\tgc_content");
            println!(
                "{}\t{}\t{}\t{}\t{:.4}",
                fold.name, fold.sequence, fold.structure, fold.mfe, fold.gc_content
            );
        }
    }

    Ok(())
}

fn print_text_fold(fold: &FoldResult) {
    println!("Fold: {}", fold.name);
    println!("{}", "=".repeat(60));
    println!("\n{}", fold.sequence);
    println!("{}", fold.structure);
    println!("\nMFE: {:.2} kcal/mol", fold.mfe);
    println!("GC content: {:.1}%", fold.gc_content * 100.0);
}
