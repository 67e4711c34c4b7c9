//! NTGS CLI - Command-line interface
//!
//! Edits the NTGS data-conversion configuration stored in a `.ntgs` workspace.

mod cli;
mod commands;
mod dry_run;
mod errors;
mod interactive;
mod output;
mod output_types;
mod workspace;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Execute the command
    if let Err(error) = commands::execute(cli) {
        errors::from_anyhow(error).display();
        std::process::exit(1);
    }

    Ok(())
}
