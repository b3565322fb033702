//! Configuration for the partition state manager
//!
//! Controls how loudly the manager reports offset regressions and anomalies.
//! Every field has a default, so an empty YAML document is a valid config.
//!
//! ```yaml
//! local_regression_level: WARN
//! remote_regression_level: INFO
//! stale_message_level: WARN
//! warn_on_remote_behind_from_remote: false
//! ```

use crate::error::{Error, Result};
use crate::types::LogLevel;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Manager configuration loaded from YAML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManagerConfig {
    /// Level used when the local offset moves backwards (or is cleared)
    #[serde(default = "default_local_regression_level")]
    pub local_regression_level: LogLevel,

    /// Level used when the remote offset moves backwards (or is cleared)
    #[serde(default = "default_remote_regression_level")]
    pub remote_regression_level: LogLevel,

    /// Level used when a validated message is older than the local offset
    #[serde(default = "default_stale_message_level")]
    pub stale_message_level: LogLevel,

    /// Also warn when a remote update leaves the partition in `remote_behind`.
    /// Off by default: only local updates report that excursion.
    #[serde(default)]
    pub warn_on_remote_behind_from_remote: bool,
}

fn default_local_regression_level() -> LogLevel {
    LogLevel::Warn
}

fn default_remote_regression_level() -> LogLevel {
    LogLevel::Info
}

fn default_stale_message_level() -> LogLevel {
    LogLevel::Warn
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            local_regression_level: default_local_regression_level(),
            remote_regression_level: default_remote_regression_level(),
            stale_message_level: default_stale_message_level(),
            warn_on_remote_behind_from_remote: false,
        }
    }
}

impl ManagerConfig {
    /// Set the local regression log level
    #[must_use]
    pub fn local_regression_level(mut self, level: LogLevel) -> Self {
        self.local_regression_level = level;
        self
    }

    /// Set the remote regression log level
    #[must_use]
    pub fn remote_regression_level(mut self, level: LogLevel) -> Self {
        self.remote_regression_level = level;
        self
    }

    /// Set the stale message log level
    #[must_use]
    pub fn stale_message_level(mut self, level: LogLevel) -> Self {
        self.stale_message_level = level;
        self
    }

    /// Enable or disable the `remote_behind` warning on remote updates
    #[must_use]
    pub fn warn_on_remote_behind_from_remote(mut self, enabled: bool) -> Self {
        self.warn_on_remote_behind_from_remote = enabled;
        self
    }
}

/// Load a manager configuration from a YAML file
pub fn load_config(path: impl AsRef<Path>) -> Result<ManagerConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        Error::config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;
    load_config_from_str(&content)
}

/// Load a manager configuration from a YAML string
pub fn load_config_from_str(yaml: &str) -> Result<ManagerConfig> {
    if yaml.trim().is_empty() {
        return Ok(ManagerConfig::default());
    }

    serde_yaml::from_str(yaml)
        .map_err(|e| Error::config(format!("Failed to parse config YAML: {e}")))
}
