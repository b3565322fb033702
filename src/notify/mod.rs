//! Transition notification module
//!
//! Adapters that turn the manager's transition callback into something a
//! consumer loop can act on.
//!
//! # Overview
//!
//! The notify module provides:
//! - `Transition` - Owned, serializable record of one state change
//! - `channel_callback` - Hands transitions off to an async task over a channel
//! - `PartitionControl` - Pause/resume hook for the local consumer
//! - `pause_resume_callback` - Pauses a partition unless it is `local_behind`
//! - `PausedPartitions` - In-memory `PartitionControl` that tracks the paused set

mod control;
mod types;

pub use control::{pause_resume_callback, PartitionControl, PausedPartitions};
pub use types::{channel_callback, ConsumerAction, Transition};
