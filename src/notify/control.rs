//! Pause/resume control for the local consumer

use super::types::{ConsumerAction, Transition};
use crate::state::{PartitionKey, PartitionRecord};
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// Hook into the local consumer's fetch control.
///
/// Called from inside the manager's transition callback, so implementations
/// must be quick and must not call back into the manager.
pub trait PartitionControl: Send + Sync {
    /// Stop fetching from a partition
    fn pause(&self, topic: &str, partition: i32);

    /// Resume fetching from a partition
    fn resume(&self, topic: &str, partition: i32);
}

impl<T: PartitionControl + ?Sized> PartitionControl for Arc<T> {
    fn pause(&self, topic: &str, partition: i32) {
        (**self).pause(topic, partition);
    }

    fn resume(&self, topic: &str, partition: i32) {
        (**self).resume(topic, partition);
    }
}

/// Create a callback that pauses a partition whenever it leaves `local_behind`
/// (or first appears) and resumes it when it enters `local_behind`.
pub fn pause_resume_callback<C>(
    control: C,
) -> impl Fn(&str, i32, &PartitionRecord, &PartitionRecord) + Send + Sync + 'static
where
    C: PartitionControl + 'static,
{
    move |topic: &str, partition: i32, previous: &PartitionRecord, updated: &PartitionRecord| {
        let transition = Transition::new(topic, partition, previous, updated);
        match transition.action() {
            ConsumerAction::Pause => control.pause(topic, partition),
            ConsumerAction::Resume => control.resume(topic, partition),
        }
    }
}

/// In-memory `PartitionControl` that remembers which partitions are paused
#[derive(Debug, Default)]
pub struct PausedPartitions {
    paused: Mutex<BTreeSet<PartitionKey>>,
}

impl PausedPartitions {
    /// Create an empty paused set
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a partition is currently paused
    pub fn is_paused(&self, topic: &str, partition: i32) -> bool {
        self.paused
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&PartitionKey::new(topic, partition))
    }

    /// Paused partitions, sorted
    pub fn paused(&self) -> Vec<PartitionKey> {
        self.paused
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }
}

impl PartitionControl for PausedPartitions {
    fn pause(&self, topic: &str, partition: i32) {
        let inserted = self
            .paused
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(PartitionKey::new(topic, partition));
        if inserted {
            debug!(topic, partition, "Paused partition");
        }
    }

    fn resume(&self, topic: &str, partition: i32) {
        let removed = self
            .paused
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&PartitionKey::new(topic, partition));
        if removed {
            debug!(topic, partition, "Resumed partition");
        }
    }
}
