//! Scenario runner

use super::types::{PartitionSummary, ReplayReport, Scenario, Step, StepError, StepOutcome};
use crate::config::ManagerConfig;
use crate::error::Result;
use crate::notify::{pause_resume_callback, PausedPartitions, Transition};
use crate::state::PartitionStateManager;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, warn};

/// Runs scenarios against a fresh `PartitionStateManager`
#[derive(Debug, Clone, Default)]
pub struct Replayer {
    config: ManagerConfig,
    continue_on_error: bool,
}

impl Replayer {
    /// Create a replayer with the given manager configuration
    pub fn new(config: ManagerConfig) -> Self {
        Self {
            config,
            continue_on_error: false,
        }
    }

    /// Keep going after an invalid state transition instead of stopping
    #[must_use]
    pub fn continue_on_error(mut self, enabled: bool) -> Self {
        self.continue_on_error = enabled;
        self
    }

    /// Replay a scenario and report every step
    pub fn run(&self, scenario: &Scenario) -> ReplayReport {
        let transitions: Arc<Mutex<Vec<Transition>>> = Arc::default();
        let control = Arc::new(PausedPartitions::new());

        let sink = Arc::clone(&transitions);
        let pause_resume = pause_resume_callback(Arc::clone(&control));
        let manager = PartitionStateManager::with_config(
            self.config.clone(),
            move |topic, partition, previous, updated| {
                sink.lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(Transition::new(topic, partition, previous, updated));
                pause_resume(topic, partition, previous, updated);
            },
        );

        info!(
            scenario = scenario.name.as_deref().unwrap_or("<unnamed>"),
            steps = scenario.steps.len(),
            "Replaying scenario"
        );

        let mut outcomes = Vec::with_capacity(scenario.steps.len());
        let mut stopped_early = false;

        for (index, step) in scenario.steps.iter().enumerate() {
            let result = apply_step(&manager, step);
            let transition = transitions
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .pop();

            let outcome = StepOutcome {
                index,
                step: step.clone(),
                error: result.as_ref().err().map(StepError::from),
                transition,
            };
            debug!(index, op = step.op(), ok = outcome.is_ok(), "Replayed step");

            let fatal = outcome.is_fatal();
            outcomes.push(outcome);

            if fatal && !self.continue_on_error {
                if let Err(e) = &result {
                    warn!(index, error = %e, "Stopping replay at fatal step");
                }
                stopped_early = index + 1 < scenario.steps.len();
                break;
            }
        }

        ReplayReport {
            name: scenario.name.clone(),
            outcomes,
            partitions: manager
                .snapshot()
                .into_iter()
                .map(|(key, record)| PartitionSummary { key, record })
                .collect(),
            paused: control.paused(),
            stopped_early,
        }
    }
}

/// Apply one step to the manager
fn apply_step(manager: &PartitionStateManager, step: &Step) -> Result<()> {
    match step {
        Step::Local {
            topic,
            partition,
            offset,
        } => manager.set_local_offset(topic, *partition, *offset),
        Step::Remote {
            topic,
            partition,
            offset,
        } => manager.set_remote_offset(topic, *partition, *offset),
        Step::Validate {
            topic,
            partition,
            offset,
        } => manager.validate_local_message(topic, *partition, *offset),
    }
}
