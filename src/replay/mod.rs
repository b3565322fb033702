//! Scenario replay module
//!
//! Feed a recorded or hand-written sequence of offset updates and message
//! checks through a fresh manager and report what happened at every step.
//!
//! # Overview
//!
//! The replay module provides:
//! - `Scenario` / `Step` - YAML (or JSON) description of the input sequence
//! - `Replayer` - Runs a scenario with a given `ManagerConfig`
//! - `ReplayReport` - Per-step outcomes, final records and paused partitions
//!
//! # Example
//!
//! ```yaml
//! name: consumer catches up
//! steps:
//!   - { op: remote, topic: events, partition: 0, offset: 100 }
//!   - { op: local, topic: events, partition: 0, offset: 50 }
//!   - { op: validate, topic: events, partition: 0, offset: 70 }
//! ```

mod parser;
mod runner;
mod types;

pub use parser::{load_scenario, load_scenario_from_str};
pub use runner::Replayer;
pub use types::{PartitionSummary, ReplayReport, Scenario, Step, StepError, StepOutcome};
