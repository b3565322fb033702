//! Partition state manager implementation
//!
//! Tracks local and remote offsets per partition behind a single lock and
//! notifies a callback on every state transition.

use super::types::{
    can_transition, derive_state, Offsets, PartitionKey, PartitionRecord,
    SynchronizedPartitionState,
};
use crate::config::ManagerConfig;
use crate::error::{Error, Result};
use crate::types::log_at;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

/// Callback invoked with `(topic, partition, previous, updated)` on every transition.
///
/// `previous.state` is `None` on the first observation of a partition;
/// `updated.state` is always `Some`.
pub type TransitionCallback = dyn Fn(&str, i32, &PartitionRecord, &PartitionRecord) + Send + Sync;

/// Which side of the pair an update came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OffsetSource {
    Local,
    Remote,
}

/// Tracks how a local consumer's progress compares to a remote consumer's
/// committed progress, per partition.
///
/// # Locking
///
/// Every operation holds one mutex for its whole duration. The callback runs
/// after the new record is stored but before the lock is released, so it sees
/// transitions for a partition in order. It must not call back into the
/// manager (that deadlocks) and should only hand the event off, e.g. with
/// [`crate::notify::channel_callback`].
pub struct PartitionStateManager {
    /// Per-partition records, created on first update
    partitions: Mutex<HashMap<PartitionKey, PartitionRecord>>,
    /// Transition callback
    callback: Box<TransitionCallback>,
    /// Logging behaviour
    config: ManagerConfig,
}

impl PartitionStateManager {
    /// Create a manager with the default configuration
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&str, i32, &PartitionRecord, &PartitionRecord) + Send + Sync + 'static,
    {
        Self::with_config(ManagerConfig::default(), callback)
    }

    /// Create a manager with an explicit configuration
    pub fn with_config<F>(config: ManagerConfig, callback: F) -> Self
    where
        F: Fn(&str, i32, &PartitionRecord, &PartitionRecord) + Send + Sync + 'static,
    {
        Self {
            partitions: Mutex::new(HashMap::new()),
            callback: Box::new(callback),
            config,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Record new progress of the local consumer.
    ///
    /// A backward move is logged, not rejected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStateTransition`] if the derived state is not a
    /// legal successor of the stored one. The stored record is left untouched.
    pub fn set_local_offset(
        &self,
        topic: &str,
        partition: i32,
        local_offset: Option<i64>,
    ) -> Result<()> {
        let mut partitions = self.lock();
        let key = PartitionKey::new(topic, partition);
        let previous = partitions.get(&key).copied().unwrap_or_default();

        if let Some(previous_offset) = previous.offsets.local {
            if local_offset.map_or(true, |offset| offset < previous_offset) {
                log_at!(
                    self.config.local_regression_level,
                    topic,
                    partition,
                    previous_offset,
                    offset = ?local_offset,
                    "Local offset moved backwards"
                );
            }
        }

        let updated_offsets = previous.offsets.with_local(local_offset);
        self.apply(
            &mut partitions,
            key,
            previous,
            updated_offsets,
            OffsetSource::Local,
        )
    }

    /// Record new committed progress of the remote consumer.
    ///
    /// A backward move is logged, not rejected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStateTransition`] if the derived state is not a
    /// legal successor of the stored one. The stored record is left untouched.
    pub fn set_remote_offset(
        &self,
        topic: &str,
        partition: i32,
        remote_offset: Option<i64>,
    ) -> Result<()> {
        let mut partitions = self.lock();
        let key = PartitionKey::new(topic, partition);
        let previous = partitions.get(&key).copied().unwrap_or_default();

        if let Some(previous_offset) = previous.offsets.remote {
            if remote_offset.map_or(true, |offset| offset < previous_offset) {
                log_at!(
                    self.config.remote_regression_level,
                    topic,
                    partition,
                    previous_offset,
                    offset = ?remote_offset,
                    "Remote offset moved backwards"
                );
            }
        }

        let updated_offsets = previous.offsets.with_remote(remote_offset);
        self.apply(
            &mut partitions,
            key,
            previous,
            updated_offsets,
            OffsetSource::Remote,
        )
    }

    /// Check whether a polled message at `offset` may be handed to processing.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidState`] if the partition is not `LocalBehind` (an
    ///   untracked partition counts as not ready).
    /// - [`Error::MessageNotReady`] if `offset` has not been committed by the
    ///   remote consumer yet.
    pub fn validate_local_message(&self, topic: &str, partition: i32, offset: i64) -> Result<()> {
        let partitions = self.lock();
        let record = partitions
            .get(&PartitionKey::new(topic, partition))
            .copied()
            .unwrap_or_default();

        if record.state != Some(SynchronizedPartitionState::LocalBehind) {
            return Err(Error::invalid_state(topic, partition, record.state));
        }

        match record.offsets.remote {
            Some(remote) if offset < remote => {}
            remote => return Err(Error::not_ready(topic, partition, offset, remote)),
        }

        if let Some(local) = record.offsets.local {
            if offset < local {
                log_at!(
                    self.config.stale_message_level,
                    topic,
                    partition,
                    offset,
                    local_offset = local,
                    "Received a message prior to local offset"
                );
            }
        }

        Ok(())
    }

    /// Get the stored record for a partition
    pub fn get(&self, topic: &str, partition: i32) -> Option<PartitionRecord> {
        self.lock()
            .get(&PartitionKey::new(topic, partition))
            .copied()
    }

    /// Get the current state for a partition (`None` if never observed)
    pub fn state(&self, topic: &str, partition: i32) -> Option<SynchronizedPartitionState> {
        self.get(topic, partition).and_then(|record| record.state)
    }

    /// Copy of all records, sorted by partition key
    pub fn snapshot(&self) -> Vec<(PartitionKey, PartitionRecord)> {
        let mut records: Vec<_> = self
            .lock()
            .iter()
            .map(|(key, record)| (key.clone(), *record))
            .collect();
        records.sort_by(|a, b| a.0.cmp(&b.0));
        records
    }

    /// Number of tracked partitions
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if no partition has been observed yet
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Validate, store and notify. Runs with the lock held by the caller.
    fn apply(
        &self,
        partitions: &mut HashMap<PartitionKey, PartitionRecord>,
        key: PartitionKey,
        previous: PartitionRecord,
        updated_offsets: Offsets,
        source: OffsetSource,
    ) -> Result<()> {
        let updated_state = derive_state(updated_offsets);

        if !can_transition(previous.state, updated_state) {
            return Err(Error::invalid_transition(
                key.topic,
                key.partition,
                previous.state,
                updated_state,
            ));
        }

        let updated = PartitionRecord::new(updated_state, updated_offsets);
        let (topic, partition) = (key.topic.clone(), key.partition);
        partitions.insert(key, updated);

        if previous.state == Some(updated_state) {
            return Ok(());
        }

        // Only the local path warns by default: local running past remote is the
        // anomaly. `warn_on_remote_behind_from_remote` extends it to remote updates.
        if updated_state == SynchronizedPartitionState::RemoteBehind
            && (source == OffsetSource::Local || self.config.warn_on_remote_behind_from_remote)
        {
            warn!(
                topic = %topic,
                partition,
                local_offset = ?updated_offsets.local,
                remote_offset = ?updated_offsets.remote,
                "Local consumer is ahead of remote consumer"
            );
        }

        debug!(
            topic = %topic,
            partition,
            previous = ?previous.state,
            updated = %updated_state,
            "Partition state transition"
        );

        (self.callback)(&topic, partition, &previous, &updated);
        Ok(())
    }

    /// Records are stored before the callback runs, so a panicking callback
    /// cannot leave a half-written record behind a poisoned lock.
    fn lock(&self) -> MutexGuard<'_, HashMap<PartitionKey, PartitionRecord>> {
        self.partitions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for PartitionStateManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartitionStateManager")
            .field("partitions", &self.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
