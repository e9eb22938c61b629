// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use std::fmt;

/// Behaviour of [`Producer::enqueue`](crate::Producer::enqueue) when a
/// bounded queue already holds `capacity` pending handles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Fail with [`EnqueueError::Full`](crate::EnqueueError::Full) and hand
    /// the handle back. Every queued frame reaches the consumer.
    #[default]
    Reject,
    /// Move the oldest pending handle into the free pool and append the new
    /// one. The consumer always sees the most recent frames; stale frames are
    /// recycled to the producer.
    DropOldest,
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OverflowPolicy::Reject => write!(f, "reject"),
            OverflowPolicy::DropOldest => write!(f, "drop-oldest"),
        }
    }
}

/// Construction parameters for a hand-off queue.
///
/// A capacity of zero means unbounded, which is the usual setting for
/// metadata queues. Image streams use a small bounded capacity matching the
/// number of buffers the consumer may hold pending.
///
/// # Example
///
/// ```
/// use edgefirst_handoff::{handoff, OverflowPolicy, QueueConfig};
///
/// let config = QueueConfig::new()
///     .with_name("preview")
///     .with_capacity(3)
///     .with_overflow(OverflowPolicy::DropOldest);
/// let (producer, consumer) = handoff::<u32>(config);
/// assert_eq!(producer.capacity(), Some(3));
/// assert_eq!(consumer.name(), "preview");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueueConfig {
    pub(crate) name: String,
    pub(crate) capacity: usize,
    pub(crate) overflow: OverflowPolicy,
}

impl QueueConfig {
    /// Unbounded, rejecting, unnamed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounded queue with the given capacity.
    pub fn bounded(capacity: usize) -> Self {
        Self::default().with_capacity(capacity)
    }

    /// Name used to identify the queue in log messages and stats.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Maximum number of pending handles, 0 for unbounded.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `None` when unbounded.
    pub fn capacity(&self) -> Option<usize> {
        (self.capacity > 0).then_some(self.capacity)
    }

    pub fn overflow(&self) -> OverflowPolicy {
        self.overflow
    }
}
