// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! # EdgeFirst Handoff Library
//!
//! A single-producer/single-consumer queue that hands buffer handles from a
//! capture thread to a processing thread without polling. It implements the
//! buffer queue protocol used between camera pipelines and their consumers:
//! the producer owns the queue, notifies the consumer when the queue becomes
//! non-empty, and receives spent buffers back through a free pool.
//!
//! ## Features
//!
//! - **Edge-triggered notification**: the consumer is called back once when
//!   the queue becomes non-empty, or after it has observed an empty queue,
//!   never on every enqueue.
//! - **Reentrant callbacks**: the notification runs with no lock held, so the
//!   consumer may dequeue directly from inside the callback.
//! - **Bounded or unbounded**: image streams use a small fixed capacity,
//!   metadata streams may run unbounded.
//! - **Latest-frame mode**: with [`OverflowPolicy::DropOldest`] a slow
//!   consumer always sees the newest frames while stale ones are recycled.
//! - **Buffer recycling**: released and displaced handles return to a free
//!   pool the producer draws from.
//! - **Abandonment**: either side may terminate the session; every later
//!   operation fails with a terminal error instead of blocking.
//!
//! ## Example
//!
//! ```
//! use edgefirst_handoff::{handoff, DequeueError, QueueConfig, QueueSource};
//! use std::sync::{
//!     atomic::{AtomicUsize, Ordering},
//!     Arc,
//! };
//!
//! let (producer, consumer) = handoff::<u64>(QueueConfig::bounded(4).with_name("frames"));
//!
//! let seen = Arc::new(AtomicUsize::new(0));
//! let counter = seen.clone();
//! consumer.set_listener(move |source: &dyn QueueSource<u64>| {
//!     // Runs on the producer's thread, dequeuing here does not deadlock.
//!     while let Ok(frame) = source.dequeue() {
//!         counter.fetch_add(1, Ordering::SeqCst);
//!         source.release(frame).unwrap();
//!     }
//! });
//!
//! producer.enqueue(1).unwrap();
//! producer.enqueue(2).unwrap();
//! assert_eq!(seen.load(Ordering::SeqCst), 2);
//! assert_eq!(consumer.dequeue(), Err(DequeueError::Empty));
//! assert_eq!(producer.acquire().unwrap(), Some(1));
//! ```

pub mod config;
pub mod error;
pub mod listener;
pub mod queue;
pub mod stats;
pub mod wake;

pub use config::{OverflowPolicy, QueueConfig};
pub use error::{Abandoned, DequeueError, EnqueueError, ReleaseError};
pub use listener::{NotEmptyListener, QueueSource};
pub use queue::{handoff, Consumer, Producer};
pub use stats::QueueStats;
pub use wake::{wake_signal, WakeSignal, Waiter};
