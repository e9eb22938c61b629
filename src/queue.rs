// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Single-producer/single-consumer hand-off queue.
//!
//! The producer owns the queue and its contents. At start the queue is empty
//! and the notification edge is armed, so the first enqueue notifies the
//! consumer. After a notification the consumer dequeues until it receives
//! [`DequeueError::Empty`]; that empty result re-arms the edge and the
//! consumer does not need to look at the queue again until it is notified.
//!
//! One mutex guards every piece of state. The listener is cloned out of the
//! lock and invoked with no lock held, so a listener may dequeue on the
//! producer's call stack.

use crate::{
    config::{OverflowPolicy, QueueConfig},
    error::{Abandoned, DequeueError, EnqueueError, ReleaseError},
    listener::{NotEmptyListener, QueueSource},
    stats::QueueStats,
};
use parking_lot::Mutex;
use std::{collections::VecDeque, fmt, mem, sync::Arc};
use tracing::{debug, trace, warn};

/// Creates a hand-off queue and returns its two endpoints.
///
/// # Example
///
/// ```
/// use edgefirst_handoff::{handoff, DequeueError, EnqueueError, QueueConfig};
///
/// let (producer, consumer) = handoff::<&str>(QueueConfig::bounded(2));
/// producer.enqueue("a").unwrap();
/// producer.enqueue("b").unwrap();
/// assert_eq!(producer.enqueue("c"), Err(EnqueueError::Full("c")));
///
/// assert_eq!(consumer.dequeue(), Ok("a"));
/// assert_eq!(consumer.dequeue(), Ok("b"));
/// assert_eq!(consumer.dequeue(), Err(DequeueError::Empty));
/// ```
pub fn handoff<H>(config: QueueConfig) -> (Producer<H>, Consumer<H>) {
    debug!(
        queue = %config.name,
        capacity = config.capacity,
        overflow = %config.overflow,
        "hand-off queue created"
    );
    let queue = Arc::new(HandoffQueue {
        config,
        state: Mutex::new(State::new()),
    });
    (
        Producer {
            queue: queue.clone(),
        },
        Consumer { queue },
    )
}

#[derive(Default)]
pub(crate) struct Counters {
    pub(crate) enqueued: u64,
    pub(crate) dequeued: u64,
    pub(crate) released: u64,
    pub(crate) displaced: u64,
    pub(crate) rejected: u64,
    pub(crate) notifications: u64,
}

struct State<H> {
    pending: VecDeque<H>,
    free: VecDeque<H>,
    outstanding: usize,
    armed: bool,
    abandoned: bool,
    listener: Option<Arc<dyn NotEmptyListener<H>>>,
    counters: Counters,
}

impl<H> State<H> {
    fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            free: VecDeque::new(),
            outstanding: 0,
            armed: true,
            abandoned: false,
            listener: None,
            counters: Counters::default(),
        }
    }
}

struct HandoffQueue<H> {
    config: QueueConfig,
    state: Mutex<State<H>>,
}

impl<H> HandoffQueue<H> {
    fn enqueue(&self, handle: H) -> Result<(), EnqueueError<H>> {
        let listener = {
            let mut state = self.state.lock();
            if state.abandoned {
                return Err(EnqueueError::Abandoned(handle));
            }

            let was_empty = state.pending.is_empty();
            if self.config.capacity > 0 && state.pending.len() >= self.config.capacity {
                match self.config.overflow {
                    OverflowPolicy::Reject => {
                        state.counters.rejected += 1;
                        trace!(queue = %self.config.name, "enqueue rejected, queue full");
                        return Err(EnqueueError::Full(handle));
                    }
                    OverflowPolicy::DropOldest => {
                        if let Some(stale) = state.pending.pop_front() {
                            state.free.push_back(stale);
                            state.counters.displaced += 1;
                            trace!(queue = %self.config.name, "displaced oldest pending handle");
                        }
                    }
                }
            }

            state.pending.push_back(handle);
            state.counters.enqueued += 1;

            if was_empty || state.armed {
                match state.listener.clone() {
                    Some(listener) => {
                        state.armed = false;
                        state.counters.notifications += 1;
                        Some(listener)
                    }
                    // Keep the edge so the next enqueue notifies once a
                    // listener is installed.
                    None => {
                        state.armed = true;
                        None
                    }
                }
            } else {
                None
            }
        };

        if let Some(listener) = listener {
            trace!(queue = %self.config.name, "notify queue not empty");
            listener.on_queue_not_empty(self);
        }

        Ok(())
    }

    fn dequeue(&self) -> Result<H, DequeueError> {
        let mut state = self.state.lock();
        if state.abandoned {
            return Err(DequeueError::Abandoned);
        }

        match state.pending.pop_front() {
            Some(handle) => {
                state.outstanding += 1;
                state.counters.dequeued += 1;
                Ok(handle)
            }
            None => {
                state.armed = true;
                Err(DequeueError::Empty)
            }
        }
    }

    fn release(&self, handle: H) -> Result<(), ReleaseError<H>> {
        let mut state = self.state.lock();
        if state.abandoned {
            return Err(ReleaseError::Abandoned(handle));
        }
        if state.outstanding == 0 {
            warn!(queue = %self.config.name, "release without an outstanding dequeue");
            return Err(ReleaseError::NotOutstanding(handle));
        }

        state.outstanding -= 1;
        state.counters.released += 1;
        state.free.push_back(handle);
        Ok(())
    }

    fn attach(&self, handle: H) -> Result<(), Abandoned<H>> {
        let mut state = self.state.lock();
        if state.abandoned {
            return Err(Abandoned(handle));
        }
        state.free.push_back(handle);
        Ok(())
    }

    fn acquire(&self) -> Result<Option<H>, Abandoned> {
        let mut state = self.state.lock();
        if state.abandoned {
            return Err(Abandoned(()));
        }
        Ok(state.free.pop_front())
    }

    fn set_listener(&self, listener: Arc<dyn NotEmptyListener<H>>) {
        let mut state = self.state.lock();
        if state.abandoned {
            drop(state);
            // Already closed, a waiter built on this listener must not block.
            listener.on_abandoned();
            return;
        }

        let previous = state.listener.replace(listener);
        drop(state);
        debug!(queue = %self.config.name, "listener installed");
        drop(previous);
    }

    fn clear_listener(&self) {
        let previous = self.state.lock().listener.take();
        if previous.is_some() {
            debug!(queue = %self.config.name, "listener removed");
        }
    }

    fn abandon(&self) -> bool {
        let (pending, free, listener) = {
            let mut state = self.state.lock();
            if state.abandoned {
                return false;
            }
            state.abandoned = true;
            (
                mem::take(&mut state.pending),
                mem::take(&mut state.free),
                state.listener.take(),
            )
        };

        debug!(
            queue = %self.config.name,
            pending = pending.len(),
            free = free.len(),
            "hand-off queue abandoned"
        );

        // Handles may own external resources, drop them outside the lock.
        drop(pending);
        drop(free);

        if let Some(listener) = listener {
            listener.on_abandoned();
        }
        true
    }

    fn pending_count(&self) -> usize {
        self.state.lock().pending.len()
    }

    fn free_count(&self) -> usize {
        self.state.lock().free.len()
    }

    fn outstanding_count(&self) -> usize {
        self.state.lock().outstanding
    }

    fn is_abandoned(&self) -> bool {
        self.state.lock().abandoned
    }

    fn stats(&self) -> QueueStats {
        let state = self.state.lock();
        QueueStats::new(
            &self.config,
            state.pending.len(),
            state.free.len(),
            state.outstanding,
            state.abandoned,
            &state.counters,
        )
    }
}

impl<H> QueueSource<H> for HandoffQueue<H> {
    fn dequeue(&self) -> Result<H, DequeueError> {
        HandoffQueue::dequeue(self)
    }

    fn release(&self, handle: H) -> Result<(), ReleaseError<H>> {
        HandoffQueue::release(self, handle)
    }

    fn pending_count(&self) -> usize {
        HandoffQueue::pending_count(self)
    }
}

/// Producer endpoint of a hand-off queue.
///
/// Like [`Consumer`], the endpoint is not `Clone` but may be shared behind an
/// `Arc`; concurrent enqueues are serialized by the queue lock.
///
/// Dropping the producer abandons the queue.
pub struct Producer<H> {
    queue: Arc<HandoffQueue<H>>,
}

impl<H> Producer<H> {
    /// Appends a handle to the tail of the queue.
    ///
    /// When the queue was empty, or the consumer has observed an empty queue
    /// since the last notification, the consumer's listener is invoked on
    /// this thread before returning.
    pub fn enqueue(&self, handle: H) -> Result<(), EnqueueError<H>> {
        self.queue.enqueue(handle)
    }

    /// Places a producer-owned buffer into the free pool.
    pub fn attach(&self, handle: H) -> Result<(), Abandoned<H>> {
        self.queue.attach(handle)
    }

    /// Takes a recycled buffer from the free pool, oldest first.
    ///
    /// The pool holds buffers attached by the producer, buffers released by
    /// the consumer and pending buffers displaced by
    /// [`OverflowPolicy::DropOldest`].
    pub fn acquire(&self) -> Result<Option<H>, Abandoned> {
        self.queue.acquire()
    }

    pub fn pending_count(&self) -> usize {
        self.queue.pending_count()
    }

    pub fn free_count(&self) -> usize {
        self.queue.free_count()
    }

    /// Terminates the session. Returns `true` if this call closed the queue.
    pub fn abandon(&self) -> bool {
        self.queue.abandon()
    }

    pub fn is_abandoned(&self) -> bool {
        self.queue.is_abandoned()
    }

    pub fn name(&self) -> &str {
        &self.queue.config.name
    }

    pub fn capacity(&self) -> Option<usize> {
        self.queue.config.capacity()
    }

    pub fn stats(&self) -> QueueStats {
        self.queue.stats()
    }
}

impl<H> Drop for Producer<H> {
    fn drop(&mut self) {
        self.queue.abandon();
    }
}

impl<H> fmt::Debug for Producer<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Producer")
            .field("name", &self.queue.config.name)
            .field("pending", &self.queue.pending_count())
            .finish()
    }
}

/// Consumer endpoint of a hand-off queue.
///
/// The endpoint is not `Clone`, but it is `Sync`: sharing it behind an `Arc`
/// lets several threads dequeue from the same queue. Every operation is still
/// serialized by the queue lock, so each handle is delivered once, though
/// FIFO order then only holds per dequeue call, not per thread.
///
/// Dropping the consumer abandons the queue.
pub struct Consumer<H> {
    queue: Arc<HandoffQueue<H>>,
}

impl<H> Consumer<H> {
    /// Removes the oldest pending handle.
    ///
    /// [`DequeueError::Empty`] arms the notification edge: the next enqueue
    /// will invoke the listener exactly once.
    pub fn dequeue(&self) -> Result<H, DequeueError> {
        self.queue.dequeue()
    }

    /// Returns a dequeued handle to the producer's free pool. The handle is
    /// not placed back into the queue.
    pub fn release(&self, handle: H) -> Result<(), ReleaseError<H>> {
        self.queue.release(handle)
    }

    /// Installs the not-empty listener, replacing any previous one.
    ///
    /// Handles already pending do not trigger a notification by themselves;
    /// drain the queue until [`DequeueError::Empty`] after installing. If the
    /// queue is already abandoned the listener's `on_abandoned` runs
    /// immediately.
    pub fn set_listener<L>(&self, listener: L)
    where
        L: NotEmptyListener<H> + 'static,
    {
        self.queue.set_listener(Arc::new(listener));
    }

    pub fn clear_listener(&self) {
        self.queue.clear_listener();
    }

    /// Advisory count of pending handles.
    pub fn pending_count(&self) -> usize {
        self.queue.pending_count()
    }

    /// Handles dequeued and not yet released.
    pub fn outstanding_count(&self) -> usize {
        self.queue.outstanding_count()
    }

    /// Terminates the session. Returns `true` if this call closed the queue.
    pub fn abandon(&self) -> bool {
        self.queue.abandon()
    }

    pub fn is_abandoned(&self) -> bool {
        self.queue.is_abandoned()
    }

    pub fn name(&self) -> &str {
        &self.queue.config.name
    }

    pub fn capacity(&self) -> Option<usize> {
        self.queue.config.capacity()
    }

    pub fn stats(&self) -> QueueStats {
        self.queue.stats()
    }
}

impl<H> QueueSource<H> for Consumer<H> {
    fn dequeue(&self) -> Result<H, DequeueError> {
        self.queue.dequeue()
    }

    fn release(&self, handle: H) -> Result<(), ReleaseError<H>> {
        self.queue.release(handle)
    }

    fn pending_count(&self) -> usize {
        self.queue.pending_count()
    }
}

impl<H> Drop for Consumer<H> {
    fn drop(&mut self) {
        self.queue.abandon();
    }
}

impl<H> fmt::Debug for Consumer<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Consumer")
            .field("name", &self.queue.config.name)
            .field("pending", &self.queue.pending_count())
            .field("outstanding", &self.queue.outstanding_count())
            .finish()
    }
}
