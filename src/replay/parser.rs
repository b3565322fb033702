//! Scenario file parser
//!
//! Scenarios are YAML; JSON files parse as well since YAML accepts them.

use super::types::{Scenario, Step};
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Load a scenario from a file
pub fn load_scenario(path: impl AsRef<Path>) -> Result<Scenario> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        Error::config(format!(
            "Failed to read scenario file '{}': {}",
            path.display(),
            e
        ))
    })?;
    load_scenario_from_str(&content)
}

/// Load a scenario from a YAML string
pub fn load_scenario_from_str(yaml: &str) -> Result<Scenario> {
    let scenario: Scenario = serde_yaml::from_str(yaml)
        .map_err(|e| Error::config(format!("Failed to parse scenario YAML: {e}")))?;

    validate_scenario(&scenario)?;
    Ok(scenario)
}

/// Validate a scenario
fn validate_scenario(scenario: &Scenario) -> Result<()> {
    if scenario.steps.is_empty() {
        return Err(Error::config("Scenario must have at least one step"));
    }

    for (index, step) in scenario.steps.iter().enumerate() {
        validate_step(index, step)?;
    }

    Ok(())
}

/// Validate a single step
fn validate_step(index: usize, step: &Step) -> Result<()> {
    if step.topic().is_empty() {
        return Err(Error::config(format!(
            "Step {index} ({}) has an empty topic",
            step.op()
        )));
    }

    if step.partition() < 0 {
        return Err(Error::config(format!(
            "Step {index} ({}) has negative partition {}",
            step.op(),
            step.partition()
        )));
    }

    Ok(())
}
