//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{load_config, ManagerConfig};
use crate::error::{Error, Result, ResultExt};
use crate::replay::{load_scenario, ReplayReport, Replayer};
use crate::state::{derive_state, Offsets, SynchronizedPartitionState};
use serde_json::json;
use std::fmt::Write as _;
use std::path::Path;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Replay {
                scenario,
                continue_on_error,
            } => self.replay(scenario, *continue_on_error),
            Commands::Derive { local, remote } => {
                println!("{}", render_derive(Offsets::new(*local, *remote), self.cli.format)?);
                Ok(())
            }
            Commands::Transitions => {
                println!("{}", render_transitions(self.cli.format)?);
                Ok(())
            }
        }
    }

    /// Load manager configuration (defaults when no file is given)
    fn load_config(&self) -> Result<ManagerConfig> {
        match &self.cli.config {
            Some(path) => load_config(path)
                .with_context(|| format!("Loading manager config {}", path.display())),
            None => Ok(ManagerConfig::default()),
        }
    }

    /// Replay a scenario file and print the report
    fn replay(&self, scenario: &Path, continue_on_error: bool) -> Result<()> {
        let config = self.load_config()?;
        let scenario = load_scenario(scenario).context("Loading scenario")?;

        let report = Replayer::new(config)
            .continue_on_error(continue_on_error)
            .run(&scenario);

        println!("{}", render_report(&report, self.cli.format)?);

        if report.has_fatal_error() {
            return Err(Error::Other(
                "Replay hit an invalid state transition".to_string(),
            ));
        }
        Ok(())
    }
}

/// Render the derived state for an offset pair
pub(crate) fn render_derive(offsets: Offsets, format: OutputFormat) -> Result<String> {
    let state = derive_state(offsets);
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(&json!({
            "offsets": offsets,
            "state": state,
            "consumable": state.is_consumable(),
        }))?),
        OutputFormat::Pretty => Ok(format!(
            "local={} remote={} -> {state}{}",
            fmt_offset(offsets.local),
            fmt_offset(offsets.remote),
            if state.is_consumable() { " (consumable)" } else { "" }
        )),
    }
}

/// Render the transition table
pub(crate) fn render_transitions(format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut table = serde_json::Map::new();
            table.insert("none".to_string(), json!([SynchronizedPartitionState::Unknown]));
            for state in SynchronizedPartitionState::ALL {
                table.insert(state.to_string(), json!(state.legal_successors()));
            }
            Ok(serde_json::to_string(&table)?)
        }
        OutputFormat::Pretty => {
            let mut out = format!("{:<15} unknown\n", "(none)");
            for state in SynchronizedPartitionState::ALL {
                let successors: Vec<_> = state
                    .legal_successors()
                    .iter()
                    .map(|s| s.as_str())
                    .collect();
                let _ = writeln!(out, "{:<15} {}", state.as_str(), successors.join(", "));
            }
            Ok(out.trim_end().to_string())
        }
    }
}

/// Render a replay report
pub(crate) fn render_report(report: &ReplayReport, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(report)?);
    }

    let mut out = String::new();
    if let Some(name) = &report.name {
        let _ = writeln!(out, "Scenario: {name}");
    }

    for outcome in &report.outcomes {
        let step = &outcome.step;
        let _ = write!(
            out,
            "#{:<3} {:<8} {}/{}",
            outcome.index,
            step.op(),
            step.topic(),
            step.partition()
        );
        if let Some(transition) = &outcome.transition {
            let from = transition
                .from_state()
                .map_or("none", SynchronizedPartitionState::as_str);
            let _ = write!(out, "  {from} -> {}", transition.to_state());
        }
        if let Some(error) = &outcome.error {
            let _ = write!(out, "  ERROR [{}] {}", error.kind, error.message);
        }
        out.push('\n');
    }

    if report.stopped_early {
        out.push_str("Stopped early after a fatal step\n");
    }

    out.push_str("Partitions:\n");
    for summary in &report.partitions {
        let state = summary
            .record
            .state
            .map_or("none", SynchronizedPartitionState::as_str);
        let _ = writeln!(
            out,
            "  {} {state} local={} remote={}",
            summary.key,
            fmt_offset(summary.record.offsets.local),
            fmt_offset(summary.record.offsets.remote)
        );
    }

    let paused: Vec<String> = report.paused.iter().map(ToString::to_string).collect();
    let _ = write!(
        out,
        "Paused: {}",
        if paused.is_empty() {
            "-".to_string()
        } else {
            paused.join(", ")
        }
    );

    Ok(out)
}

fn fmt_offset(offset: Option<i64>) -> String {
    offset.map_or_else(|| "?".to_string(), |o| o.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::load_scenario_from_str;
    use clap::{CommandFactory, Parser};

    #[test]
    fn test_cli_reports_crate_version() {
        let command = Cli::command();
        assert_eq!(command.get_name(), crate::NAME);
        assert_eq!(command.get_version(), Some(crate::VERSION));

        let err = Cli::try_parse_from(["partition-sync", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
        assert!(err.to_string().contains(crate::VERSION));
    }

    #[test]
    fn test_parse_replay_command() {
        let cli = Cli::try_parse_from([
            "partition-sync",
            "replay",
            "scenario.yaml",
            "--continue-on-error",
            "-f",
            "pretty",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Pretty);
        match cli.command {
            Commands::Replay {
                scenario,
                continue_on_error,
            } => {
                assert_eq!(scenario.to_str(), Some("scenario.yaml"));
                assert!(continue_on_error);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_derive_negative_offset() {
        let cli = Cli::try_parse_from([
            "partition-sync",
            "derive",
            "--local",
            "-1",
            "--remote",
            "0",
        ])
        .unwrap();
        match cli.command {
            Commands::Derive { local, remote } => {
                assert_eq!(local, Some(-1));
                assert_eq!(remote, Some(0));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_render_derive() {
        let json = render_derive(Offsets::new(Some(1), Some(2)), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["state"], "local_behind");
        assert_eq!(value["consumable"], true);

        let pretty = render_derive(Offsets::new(None, Some(2)), OutputFormat::Pretty).unwrap();
        assert_eq!(pretty, "local=? remote=2 -> unknown");
    }

    #[test]
    fn test_render_transitions() {
        let json = render_transitions(OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["none"], json!(["unknown"]));
        assert_eq!(value["remote_behind"], json!(["local_behind", "synchronized"]));

        let pretty = render_transitions(OutputFormat::Pretty).unwrap();
        assert_eq!(pretty.lines().count(), 5);
        assert!(pretty.contains("unknown         local_behind, remote_behind, synchronized"));
    }

    #[test]
    fn test_render_report_pretty() {
        let scenario = load_scenario_from_str(
            r"
name: demo
steps:
  - { op: remote, topic: t, partition: 0, offset: 10 }
  - { op: validate, topic: t, partition: 0, offset: 1 }
",
        )
        .unwrap();
        let report = Replayer::default().run(&scenario);

        let pretty = render_report(&report, OutputFormat::Pretty).unwrap();
        assert!(pretty.starts_with("Scenario: demo"));
        assert!(pretty.contains("remote   t/0  none -> unknown"));
        assert!(pretty.contains("ERROR [invalid_state]"));
        assert!(pretty.contains("t/0 unknown local=? remote=10"));
        assert!(pretty.ends_with("Paused: t/0"));
    }
}
