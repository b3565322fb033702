//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Partition state synchronization tools
#[derive(Parser, Debug)]
#[command(name = crate::NAME)]
#[command(author, version = crate::VERSION, about, long_about = None)]
pub struct Cli {
    /// Manager configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a scenario of offset updates and message checks
    Replay {
        /// Scenario file (YAML or JSON)
        scenario: PathBuf,

        /// Keep going after an invalid state transition
        #[arg(long)]
        continue_on_error: bool,
    },

    /// Derive the state for a pair of offsets (omit one for "unknown")
    Derive {
        /// Local consumer offset
        #[arg(long, allow_hyphen_values = true)]
        local: Option<i64>,

        /// Remote consumer offset
        #[arg(long, allow_hyphen_values = true)]
        remote: Option<i64>,
    },

    /// Show the legal state transitions
    Transitions,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Human-readable output
    Pretty,
}
