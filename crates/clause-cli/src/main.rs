//! Clause Guard CLI
//!
//! Runs the reconciliation engine over documents stored as JSON.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: {}", "warning".yellow().bold(), e);
    }
    tracing::debug!("Verbose mode enabled");

    execute_command(cli.command).await
}

async fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Validate {
            document,
            config,
            write,
            json,
        } => commands::run_validate(&document, config.as_deref(), write, json).await,
        Commands::Reset { document } => commands::run_reset(&document).await,
        Commands::Fingerprint { file } => commands::run_fingerprint(&file),
        Commands::Inspect { tag } => commands::run_inspect(&tag),
        Commands::Tag {
            clause_id,
            index,
            baseline,
            template,
        } => commands::run_tag(&clause_id, &index, baseline.as_deref(), template),
    }
}
