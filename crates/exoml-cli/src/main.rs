//! ExoML CLI - dataset ingestion and transit-signal classification.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "exoml=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = commands::build_engine(cli.config.as_deref()).and_then(|exoml| match cli.command {
        Commands::Inspect {
            file,
            overrides,
            json,
        } => commands::inspect::run(&exoml, file, overrides, json, cli.verbose),

        Commands::Export {
            file,
            output,
            overrides,
        } => commands::export::run(&exoml, file, output, overrides),

        Commands::Classify {
            signal,
            json,
            report,
        } => commands::classify::run(&exoml, signal, json, report),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
