// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

#![allow(dead_code)]

use edgefirst_handoff::{NotEmptyListener, QueueSource};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

/// Counts listener invocations without touching the queue.
#[derive(Default)]
pub struct Counts {
    notified: AtomicUsize,
    abandoned: AtomicUsize,
}

impl Counts {
    pub fn notified(&self) -> usize {
        self.notified.load(Ordering::SeqCst)
    }

    pub fn abandoned(&self) -> usize {
        self.abandoned.load(Ordering::SeqCst)
    }
}

pub struct Recorder(pub Arc<Counts>);

impl Recorder {
    pub fn new() -> (Self, Arc<Counts>) {
        let counts = Arc::new(Counts::default());
        (Recorder(counts.clone()), counts)
    }
}

impl<H> NotEmptyListener<H> for Recorder {
    fn on_queue_not_empty(&self, _source: &dyn QueueSource<H>) {
        self.0.notified.fetch_add(1, Ordering::SeqCst);
    }

    fn on_abandoned(&self) {
        self.0.abandoned.fetch_add(1, Ordering::SeqCst);
    }
}
