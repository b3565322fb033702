//! State types for synchronized partition tracking
//!
//! Offsets, the derived comparison state and the fixed transition graph.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the local consumer's progress compares to the remote consumer's
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SynchronizedPartitionState {
    /// At least one offset is not known yet
    Unknown,
    /// Local is behind remote, consumption may proceed
    LocalBehind,
    /// Local has advanced past remote
    RemoteBehind,
    /// Local and remote are at the same offset
    Synchronized,
}

impl SynchronizedPartitionState {
    /// All four states, in declaration order
    pub const ALL: [Self; 4] = [
        Self::Unknown,
        Self::LocalBehind,
        Self::RemoteBehind,
        Self::Synchronized,
    ];

    /// States this state may move to. Staying in the same state is always allowed
    /// and is not listed here.
    pub fn legal_successors(self) -> &'static [Self] {
        match self {
            Self::Unknown => &[Self::LocalBehind, Self::RemoteBehind, Self::Synchronized],
            Self::RemoteBehind => &[Self::LocalBehind, Self::Synchronized],
            Self::LocalBehind => &[Self::Synchronized, Self::RemoteBehind],
            Self::Synchronized => &[Self::LocalBehind, Self::RemoteBehind],
        }
    }

    /// Whether the local consumer may process messages in this state
    pub fn is_consumable(self) -> bool {
        self == Self::LocalBehind
    }

    /// Snake-case name, as used in logs and serialized output
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::LocalBehind => "local_behind",
            Self::RemoteBehind => "remote_behind",
            Self::Synchronized => "synchronized",
        }
    }
}

impl fmt::Display for SynchronizedPartitionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check whether `previous -> updated` is allowed by the transition graph.
///
/// `None` is the placeholder before the first observation; the only way out of
/// it is `Unknown`.
pub fn can_transition(
    previous: Option<SynchronizedPartitionState>,
    updated: SynchronizedPartitionState,
) -> bool {
    match previous {
        None => updated == SynchronizedPartitionState::Unknown,
        Some(previous) if previous == updated => true,
        Some(previous) => previous.legal_successors().contains(&updated),
    }
}

/// Local and remote offsets for one partition; `None` means not known yet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Offsets {
    /// Progress of the local consumer
    pub local: Option<i64>,
    /// Committed progress of the remote consumer
    pub remote: Option<i64>,
}

impl Offsets {
    /// Create an offset pair
    pub fn new(local: Option<i64>, remote: Option<i64>) -> Self {
        Self { local, remote }
    }

    /// Copy with a new local offset
    pub fn with_local(self, local: Option<i64>) -> Self {
        Self { local, ..self }
    }

    /// Copy with a new remote offset
    pub fn with_remote(self, remote: Option<i64>) -> Self {
        Self { remote, ..self }
    }

    /// Derive the comparison state for this pair
    pub fn derive_state(self) -> SynchronizedPartitionState {
        derive_state(self)
    }
}

/// Derive the comparison state from an offset pair.
pub fn derive_state(offsets: Offsets) -> SynchronizedPartitionState {
    match (offsets.local, offsets.remote) {
        (Some(local), Some(remote)) if local < remote => SynchronizedPartitionState::LocalBehind,
        (Some(local), Some(remote)) if remote < local => SynchronizedPartitionState::RemoteBehind,
        (Some(_), Some(_)) => SynchronizedPartitionState::Synchronized,
        _ => SynchronizedPartitionState::Unknown,
    }
}

/// Identifies one tracked partition
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PartitionKey {
    /// Topic name
    pub topic: String,
    /// Partition index
    pub partition: i32,
}

impl PartitionKey {
    /// Create a partition key
    pub fn new(topic: impl Into<String>, partition: i32) -> Self {
        Self {
            topic: topic.into(),
            partition,
        }
    }
}

impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.topic, self.partition)
    }
}

/// Stored state and offsets for one partition
///
/// `state` is `None` only before the first offset has been recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionRecord {
    /// Last derived state
    pub state: Option<SynchronizedPartitionState>,
    /// Last known offsets
    pub offsets: Offsets,
}

impl PartitionRecord {
    /// Create a record from a derived state and its offsets
    pub fn new(state: SynchronizedPartitionState, offsets: Offsets) -> Self {
        Self {
            state: Some(state),
            offsets,
        }
    }
}
