// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Parks a consumer thread or task between notifications.
//!
//! [`WakeSignal`] is a [`NotEmptyListener`] that deposits a single token in a
//! one-slot kanal channel. Tokens coalesce, so a burst of notifications wakes
//! the consumer once. The token stays in the channel until the consumer takes
//! it, which means a notification that fires before the consumer starts
//! waiting is never lost.
//!
//! ```
//! use edgefirst_handoff::{handoff, wake_signal, QueueConfig};
//! use std::thread;
//!
//! let (producer, consumer) = handoff::<u32>(QueueConfig::bounded(4));
//! let (signal, waiter) = wake_signal();
//! consumer.set_listener(signal);
//!
//! let worker = thread::spawn(move || {
//!     let mut total = 0;
//!     while waiter.wait().is_ok() {
//!         while let Ok(v) = consumer.dequeue() {
//!             total += v;
//!         }
//!         if total == 6 {
//!             break;
//!         }
//!     }
//!     total
//! });
//!
//! for v in 1..=3 {
//!     while producer.enqueue(v).is_err() {
//!         thread::yield_now();
//!     }
//! }
//! assert_eq!(worker.join().unwrap(), 6);
//! ```

use crate::{
    error::Abandoned,
    listener::{NotEmptyListener, QueueSource},
};
use kanal::{Receiver, Sender};
use tracing::trace;

/// Creates a connected signal/waiter pair.
pub fn wake_signal() -> (WakeSignal, Waiter) {
    let (tx, rx) = kanal::bounded(1);
    (WakeSignal { tx }, Waiter { rx })
}

/// Listener half, install it with
/// [`Consumer::set_listener`](crate::Consumer::set_listener).
///
/// A signal belongs to exactly one queue, abandoning that queue closes its
/// waiter. It cannot be cloned onto a second queue:
///
/// ```compile_fail
/// let (signal, _waiter) = edgefirst_handoff::wake_signal();
/// let _other = signal.clone();
/// ```
pub struct WakeSignal {
    tx: Sender<()>,
}

impl WakeSignal {
    fn wake(&self) {
        // A full channel already holds a pending wake-up.
        let _ = self.tx.try_send(());
    }
}

impl<H> NotEmptyListener<H> for WakeSignal {
    fn on_queue_not_empty(&self, _source: &dyn QueueSource<H>) {
        trace!("wake consumer");
        self.wake();
    }

    fn on_abandoned(&self) {
        let _ = self.tx.close();
    }
}

/// Consumer half of a [`wake_signal`] pair.
pub struct Waiter {
    rx: Receiver<()>,
}

impl Waiter {
    /// Blocks until the queue signals that it is no longer empty.
    ///
    /// Returns [`Abandoned`] once the queue has been abandoned.
    pub fn wait(&self) -> Result<(), Abandoned> {
        self.rx.recv().map_err(|_| Abandoned(()))
    }

    /// Async variant of [`Waiter::wait`].
    pub async fn wait_async(&self) -> Result<(), Abandoned> {
        self.rx.as_async().recv().await.map_err(|_| Abandoned(()))
    }

    /// Consumes a pending wake-up without blocking. Returns `Ok(false)` when
    /// none is pending.
    pub fn try_wait(&self) -> Result<bool, Abandoned> {
        match self.rx.try_recv() {
            Ok(token) => Ok(token.is_some()),
            Err(_) => Err(Abandoned(())),
        }
    }

    pub fn is_abandoned(&self) -> bool {
        self.rx.is_closed()
    }
}
