//! CLI module
//!
//! Command-line interface for inspecting partition state behaviour.
//!
//! # Commands
//!
//! - `replay` - Run a scenario file through a fresh manager
//! - `derive` - Derive the state for a pair of offsets
//! - `transitions` - Print the transition table

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
