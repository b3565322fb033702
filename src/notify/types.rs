//! Transition event types

use crate::state::{PartitionKey, PartitionRecord, SynchronizedPartitionState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// What the local consumer should do with a partition after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsumerAction {
    /// Stop fetching from the partition
    Pause,
    /// Start fetching from the partition again
    Resume,
}

/// One state change of one partition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// Topic name
    pub topic: String,
    /// Partition index
    pub partition: i32,
    /// Record before the update (`state` is `None` on first observation)
    pub previous: PartitionRecord,
    /// Record after the update
    pub updated: PartitionRecord,
    /// When the manager reported the change
    pub observed_at: DateTime<Utc>,
}

impl Transition {
    /// Build a transition from callback arguments
    pub fn new(
        topic: &str,
        partition: i32,
        previous: &PartitionRecord,
        updated: &PartitionRecord,
    ) -> Self {
        Self {
            topic: topic.to_string(),
            partition,
            previous: *previous,
            updated: *updated,
            observed_at: Utc::now(),
        }
    }

    /// Partition this transition belongs to
    pub fn key(&self) -> PartitionKey {
        PartitionKey::new(self.topic.clone(), self.partition)
    }

    /// State before the update
    pub fn from_state(&self) -> Option<SynchronizedPartitionState> {
        self.previous.state
    }

    /// State after the update
    pub fn to_state(&self) -> SynchronizedPartitionState {
        self.updated
            .state
            .unwrap_or(SynchronizedPartitionState::Unknown)
    }

    /// Consumer action implied by the new state
    pub fn action(&self) -> ConsumerAction {
        if self.to_state().is_consumable() {
            ConsumerAction::Resume
        } else {
            ConsumerAction::Pause
        }
    }
}

/// Create a callback that forwards every transition onto an unbounded channel.
///
/// Sending never blocks, so the manager lock is released promptly. Once the
/// receiver is dropped further transitions are discarded.
pub fn channel_callback() -> (
    impl Fn(&str, i32, &PartitionRecord, &PartitionRecord) + Send + Sync + 'static,
    mpsc::UnboundedReceiver<Transition>,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let callback = move |topic: &str,
                         partition: i32,
                         previous: &PartitionRecord,
                         updated: &PartitionRecord| {
        if tx
            .send(Transition::new(topic, partition, previous, updated))
            .is_err()
        {
            tracing::debug!(topic, partition, "Transition receiver dropped");
        }
    };
    (callback, rx)
}
