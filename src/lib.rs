//! # partition-sync
//!
//! Synchronized partition-state tracking for a "local" Kafka consumer that must
//! never run ahead of a "remote" consumer's committed offsets.
//!
//! ## Features
//!
//! - **State derivation**: Compare local and remote offsets per partition
//! - **Transition validation**: Reject state changes outside the fixed transition graph
//! - **Callbacks**: Notify exactly once per state change, in order
//! - **Backpressure gate**: Decide whether a polled message may be processed
//! - **Replay**: Run offset scenarios through a manager from the command line
//!
//! ## Quick Start
//!
//! ```rust
//! use partition_sync::notify::{pause_resume_callback, PausedPartitions};
//! use partition_sync::state::PartitionStateManager;
//! use std::sync::Arc;
//!
//! let paused = Arc::new(PausedPartitions::new());
//! let manager = PartitionStateManager::new(pause_resume_callback(Arc::clone(&paused)));
//!
//! manager.set_remote_offset("events", 0, Some(100))?;
//! manager.set_local_offset("events", 0, Some(50))?;
//! assert!(!paused.is_paused("events", 0));
//!
//! // Offset 70 has been committed remotely; 150 has not
//! manager.validate_local_message("events", 0, 70)?;
//! assert!(manager.validate_local_message("events", 0, 150).is_err());
//! # Ok::<(), partition_sync::Error>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    External consumer loop                    │
//! │ set_local_offset  set_remote_offset  validate_local_message │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────┴────────────────────────────────┐
//! │  PartitionStateManager (one mutex, map of PartitionRecord)    │
//! └─────────────────────────────┬────────────────────────────────┘
//!                               │ callback(topic, partition, prev, next)
//!              ┌────────────────┴────────────────┐
//!              │ channel_callback                │ pause_resume_callback
//!              │ (mpsc hand-off)                 │ (PartitionControl)
//!              └─────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::ref_option)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types
pub mod types;

/// Partition state tracking and the backpressure gate
pub mod state;

/// Callback adapters (channel hand-off, pause/resume)
pub mod notify;

/// Manager configuration
pub mod config;

/// Scenario replay
pub mod replay;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{load_config, load_config_from_str, ManagerConfig};
pub use error::{Error, Result};
pub use state::{
    derive_state, Offsets, PartitionKey, PartitionRecord, PartitionStateManager,
    SynchronizedPartitionState,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
