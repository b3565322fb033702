//! Error types for partition-sync
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use crate::state::SynchronizedPartitionState;
use thiserror::Error;

/// Formats an optional state for error messages ("none" before the first observation)
fn fmt_state(state: &Option<SynchronizedPartitionState>) -> String {
    state.map_or_else(|| "none".to_string(), |s| s.to_string())
}

/// Formats an optional offset for error messages
fn fmt_offset(offset: &Option<i64>) -> String {
    offset.map_or_else(|| "unknown".to_string(), |o| o.to_string())
}

/// The main error type for partition-sync
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Synchronization Errors
    // ============================================================================
    #[error(
        "Invalid state transition for {topic}/{partition}: {} -> {updated}",
        fmt_state(.previous)
    )]
    InvalidStateTransition {
        topic: String,
        partition: i32,
        previous: Option<SynchronizedPartitionState>,
        updated: SynchronizedPartitionState,
    },

    #[error(
        "Received message for {topic}/{partition} while consumer is not in local_behind state (state: {})",
        fmt_state(.state)
    )]
    InvalidState {
        topic: String,
        partition: i32,
        state: Option<SynchronizedPartitionState>,
    },

    #[error(
        "Message {offset} for {topic}/{partition} is not ready (remote offset: {})",
        fmt_offset(.remote)
    )]
    MessageNotReady {
        topic: String,
        partition: i32,
        offset: i64,
        remote: Option<i64>,
    },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid transition error
    pub fn invalid_transition(
        topic: impl Into<String>,
        partition: i32,
        previous: Option<SynchronizedPartitionState>,
        updated: SynchronizedPartitionState,
    ) -> Self {
        Self::InvalidStateTransition {
            topic: topic.into(),
            partition,
            previous,
            updated,
        }
    }

    /// Create an invalid state error
    pub fn invalid_state(
        topic: impl Into<String>,
        partition: i32,
        state: Option<SynchronizedPartitionState>,
    ) -> Self {
        Self::InvalidState {
            topic: topic.into(),
            partition,
            state,
        }
    }

    /// Create a message not ready error
    pub fn not_ready(
        topic: impl Into<String>,
        partition: i32,
        offset: i64,
        remote: Option<i64>,
    ) -> Self {
        Self::MessageNotReady {
            topic: topic.into(),
            partition,
            offset,
            remote,
        }
    }

    /// Check if the caller should simply wait and try again.
    ///
    /// `InvalidState` and `MessageNotReady` mean "not ready yet". An
    /// `InvalidStateTransition` means the offset reporting upstream is broken.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::InvalidState { .. } | Error::MessageNotReady { .. }
        )
    }

    /// Short machine-readable name for the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Error::InvalidStateTransition { .. } => "invalid_state_transition",
            Error::InvalidState { .. } => "invalid_state",
            Error::MessageNotReady { .. } => "message_not_ready",
            Error::Config { .. } => "config",
            Error::JsonParse(_) => "json_parse",
            Error::Other(_) => "other",
        }
    }
}

/// Result type alias for partition-sync
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
