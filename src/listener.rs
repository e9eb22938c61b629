// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Consumer notification contract.
//!
//! The producer owns the queue. When a handle becomes available after the
//! consumer has drained the queue, the producer calls the consumer's
//! [`NotEmptyListener`] on its own thread. The callback receives a
//! [`QueueSource`] so it can dequeue immediately, on the same call stack,
//! without holding a reference back to the queue.

use crate::error::{DequeueError, ReleaseError};

/// Consumer-side view of a hand-off queue.
pub trait QueueSource<H> {
    /// Removes the oldest pending handle.
    fn dequeue(&self) -> Result<H, DequeueError>;

    /// Returns a dequeued handle to the producer's free pool.
    fn release(&self, handle: H) -> Result<(), ReleaseError<H>>;

    /// Number of pending handles. Advisory only: a result of zero does not
    /// mean a notification will follow unless a dequeue has returned
    /// [`DequeueError::Empty`].
    fn pending_count(&self) -> usize;
}

/// Receives edge-triggered "queue not empty" notifications.
///
/// `on_queue_not_empty` is called without any queue lock held, on the
/// producer's thread, once per empty to non-empty edge. It may run
/// concurrently with other consumer activity and must not assume a
/// particular thread identity.
pub trait NotEmptyListener<H>: Send + Sync {
    fn on_queue_not_empty(&self, source: &dyn QueueSource<H>);

    /// Called once when the queue is abandoned so blocked consumers can be
    /// woken.
    fn on_abandoned(&self) {}
}

impl<H, F> NotEmptyListener<H> for F
where
    F: Fn(&dyn QueueSource<H>) + Send + Sync,
{
    fn on_queue_not_empty(&self, source: &dyn QueueSource<H>) {
        self(source)
    }
}
