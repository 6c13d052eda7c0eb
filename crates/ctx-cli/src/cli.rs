//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// context-sync - Replay evaluation and build diffs against a target context
#[derive(Parser, Debug)]
#[command(name = "ctxsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Replay a scripted sequence of evaluations and builds
    ///
    /// The script (.toml, .json, .yaml) names the project root and lists
    /// steps in the order they arrive. Every call made to the target
    /// context is printed, followed by the paths left in it.
    ///
    /// Examples:
    ///   ctxsync replay steps.toml
    ///   ctxsync replay steps.toml --json
    Replay {
        /// Path to the replay script
        script: PathBuf,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_replay_with_json() {
        let cli = Cli::parse_from(["ctxsync", "replay", "steps.toml", "--json"]);
        assert_eq!(
            cli.command,
            Some(Commands::Replay {
                script: PathBuf::from("steps.toml"),
                json: true,
            })
        );
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::parse_from(["ctxsync", "replay", "steps.toml", "-v"]);
        assert!(cli.verbose);
    }
}
