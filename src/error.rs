// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Result values returned by the hand-off queue.
//!
//! `Full` and `Empty` are expected outcomes of a tight producer/consumer loop
//! and are recoverable. `Abandoned` is terminal: once observed the queue will
//! never accept or yield another handle. Errors that reject a handle carry it
//! back to the caller so ownership is never lost.

use thiserror::Error;

/// Returned by [`Producer::enqueue`](crate::Producer::enqueue).
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EnqueueError<H> {
    /// The bounded queue already holds `capacity` pending handles.
    #[error("queue is full")]
    Full(H),

    /// The session was terminated.
    #[error("queue has been abandoned")]
    Abandoned(H),
}

impl<H> EnqueueError<H> {
    /// Recovers the handle that was not enqueued.
    pub fn into_inner(self) -> H {
        match self {
            EnqueueError::Full(h) | EnqueueError::Abandoned(h) => h,
        }
    }

    pub fn is_full(&self) -> bool {
        matches!(self, EnqueueError::Full(_))
    }

    pub fn is_abandoned(&self) -> bool {
        matches!(self, EnqueueError::Abandoned(_))
    }
}

/// Returned by [`Consumer::dequeue`](crate::Consumer::dequeue).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DequeueError {
    /// No handle is pending. The next enqueue will notify the listener.
    #[error("queue is empty")]
    Empty,

    /// The session was terminated.
    #[error("queue has been abandoned")]
    Abandoned,
}

impl DequeueError {
    pub fn is_empty(&self) -> bool {
        matches!(self, DequeueError::Empty)
    }

    pub fn is_abandoned(&self) -> bool {
        matches!(self, DequeueError::Abandoned)
    }
}

/// Returned by [`Consumer::release`](crate::Consumer::release).
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReleaseError<H> {
    /// Every dequeued handle has already been released.
    #[error("no dequeued handle is outstanding")]
    NotOutstanding(H),

    /// The session was terminated; the caller keeps the handle.
    #[error("queue has been abandoned")]
    Abandoned(H),
}

impl<H> ReleaseError<H> {
    pub fn into_inner(self) -> H {
        match self {
            ReleaseError::NotOutstanding(h) | ReleaseError::Abandoned(h) => h,
        }
    }
}

/// Terminal error for operations that have no other failure mode.
///
/// Carries the rejected handle when the operation was handed one, `()`
/// otherwise.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("queue has been abandoned")]
pub struct Abandoned<H = ()>(pub H);

impl<H> Abandoned<H> {
    pub fn into_inner(self) -> H {
        self.0
    }
}
