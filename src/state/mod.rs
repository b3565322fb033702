//! Synchronized partition state module
//!
//! Tracks, per (topic, partition), how a local consumer's progress compares to a
//! remote consumer's committed progress, and gates local consumption on it.
//!
//! # Overview
//!
//! The state module provides:
//! - `SynchronizedPartitionState` - Derived comparison of local vs. remote offsets
//! - `PartitionStateManager` - Lock-guarded partition map with transition validation
//! - `validate_local_message` - Backpressure gate for the local consumer
//!
//! # Transitions
//!
//! ```text
//! from            to
//! (none)          unknown
//! unknown         local_behind, remote_behind, synchronized
//! remote_behind   local_behind, synchronized
//! local_behind    synchronized, remote_behind
//! synchronized    local_behind, remote_behind
//! ```
//!
//! Nothing returns to `unknown`. Staying in the same state is always allowed.

mod manager;
mod types;

pub use manager::{PartitionStateManager, TransitionCallback};
pub use types::{
    can_transition, derive_state, Offsets, PartitionKey, PartitionRecord,
    SynchronizedPartitionState,
};
