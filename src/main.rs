use clap::Parser;
use tracing_subscriber::EnvFilter;

use rna_interact::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("rna_interact=debug,info")
    } else {
        EnvFilter::new("rna_interact=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Predict(args) => {
            cli::predict::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Explain(args) => {
            cli::explain::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Batch(args) => {
            cli::batch::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Fold(args) => {
            cli::fold::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
