//! Scenario and report types

use crate::error::Error;
use crate::notify::Transition;
use crate::state::{PartitionKey, PartitionRecord};
use serde::{Deserialize, Serialize};

/// A named sequence of steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Optional human-readable name
    #[serde(default)]
    pub name: Option<String>,

    /// Steps, applied in order
    pub steps: Vec<Step>,
}

/// One input to the manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// `set_local_offset`; a missing offset means "unknown"
    Local {
        topic: String,
        partition: i32,
        #[serde(default)]
        offset: Option<i64>,
    },
    /// `set_remote_offset`; a missing offset means "unknown"
    Remote {
        topic: String,
        partition: i32,
        #[serde(default)]
        offset: Option<i64>,
    },
    /// `validate_local_message`
    Validate {
        topic: String,
        partition: i32,
        offset: i64,
    },
}

impl Step {
    /// Topic the step targets
    pub fn topic(&self) -> &str {
        match self {
            Step::Local { topic, .. }
            | Step::Remote { topic, .. }
            | Step::Validate { topic, .. } => topic,
        }
    }

    /// Partition the step targets
    pub fn partition(&self) -> i32 {
        match self {
            Step::Local { partition, .. }
            | Step::Remote { partition, .. }
            | Step::Validate { partition, .. } => *partition,
        }
    }

    /// Operation name as written in scenario files
    pub fn op(&self) -> &'static str {
        match self {
            Step::Local { .. } => "local",
            Step::Remote { .. } => "remote",
            Step::Validate { .. } => "validate",
        }
    }
}

/// Error produced by a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepError {
    /// Error kind, e.g. `message_not_ready`
    pub kind: String,
    /// Display text of the error
    pub message: String,
    /// Whether the consumer would simply retry later
    pub retryable: bool,
}

impl From<&Error> for StepError {
    fn from(error: &Error) -> Self {
        Self {
            kind: error.kind().to_string(),
            message: error.to_string(),
            retryable: error.is_retryable(),
        }
    }
}

/// Result of one step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// Zero-based position in the scenario
    pub index: usize,
    /// The step that ran
    pub step: Step,
    /// Error, if the step was rejected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<StepError>,
    /// State change caused by the step, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<Transition>,
}

impl StepOutcome {
    /// Check if the step succeeded
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Check if the step failed with a non-retryable error
    pub fn is_fatal(&self) -> bool {
        self.error.as_ref().is_some_and(|e| !e.retryable)
    }
}

/// Final record of one partition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionSummary {
    /// Partition key
    #[serde(flatten)]
    pub key: PartitionKey,
    /// Stored record
    pub record: PartitionRecord,
}

/// Everything a replay produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayReport {
    /// Scenario name
    #[serde(default)]
    pub name: Option<String>,
    /// One outcome per executed step
    pub outcomes: Vec<StepOutcome>,
    /// Final records, sorted by key
    pub partitions: Vec<PartitionSummary>,
    /// Partitions paused at the end of the replay
    pub paused: Vec<PartitionKey>,
    /// Whether the replay stopped before the last step
    pub stopped_early: bool,
}

impl ReplayReport {
    /// Number of state transitions observed
    pub fn transition_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.transition.is_some())
            .count()
    }

    /// Check if any step failed with a non-retryable error
    pub fn has_fatal_error(&self) -> bool {
        self.outcomes.iter().any(StepOutcome::is_fatal)
    }
}
