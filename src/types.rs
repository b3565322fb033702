//! Common types used throughout partition-sync
//!
//! This module contains shared type definitions used across multiple modules.

use serde::{Deserialize, Serialize};

// ============================================================================
// Log Level
// ============================================================================

/// Log level for operator-facing diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Emit a `tracing` event at a level chosen at runtime.
///
/// `tracing::event!` needs a constant level, so this expands to one arm per level.
macro_rules! log_at {
    ($level:expr, $($arg:tt)+) => {
        match $level {
            $crate::types::LogLevel::Trace => ::tracing::trace!($($arg)+),
            $crate::types::LogLevel::Debug => ::tracing::debug!($($arg)+),
            $crate::types::LogLevel::Info => ::tracing::info!($($arg)+),
            $crate::types::LogLevel::Warn => ::tracing::warn!($($arg)+),
            $crate::types::LogLevel::Error => ::tracing::error!($($arg)+),
        }
    };
}

pub(crate) use log_at;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_serde() {
        let level: LogLevel = serde_yaml::from_str("WARN").unwrap();
        assert_eq!(level, LogLevel::Warn);

        let json = serde_json::to_string(&LogLevel::Info).unwrap();
        assert_eq!(json, "\"INFO\"");
    }

    #[test]
    fn test_log_level_to_tracing() {
        assert_eq!(tracing::Level::from(LogLevel::Warn), tracing::Level::WARN);
        assert_eq!(tracing::Level::from(LogLevel::Trace), tracing::Level::TRACE);
    }
}
