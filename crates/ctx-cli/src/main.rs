//! context-sync CLI
//!
//! Replays evaluation and build sequences against a printing target context.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| CliError::user(format!("Failed to set tracing subscriber: {e}")))?;
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Replay { script, json }) => commands::run_replay(&script, json),
        None => {
            println!("{} context-sync CLI", "ctxsync".green().bold());
            println!();
            println!("Run {} for available commands.", "ctxsync --help".cyan());
            Ok(())
        }
    }
}
