// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use crate::{config::QueueConfig, queue::Counters};
use std::fmt;
use serde_json::json;

/// Point-in-time snapshot of a hand-off queue.
///
/// All fields are read under the queue lock so they are consistent with each
/// other, but the queue may have moved on by the time they are inspected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueueStats {
    pub name: String,
    /// `None` when unbounded.
    pub capacity: Option<usize>,
    pub pending: usize,
    pub free: usize,
    pub outstanding: usize,
    pub enqueued: u64,
    pub dequeued: u64,
    pub released: u64,
    /// Pending handles moved to the free pool by the drop-oldest policy.
    pub displaced: u64,
    /// Enqueues refused because the queue was full.
    pub rejected: u64,
    pub notifications: u64,
    pub abandoned: bool,
}

impl QueueStats {
    pub(crate) fn new(
        config: &QueueConfig,
        pending: usize,
        free: usize,
        outstanding: usize,
        abandoned: bool,
        counters: &Counters,
    ) -> Self {
        Self {
            name: config.name.clone(),
            capacity: config.capacity(),
            pending,
            free,
            outstanding,
            enqueued: counters.enqueued,
            dequeued: counters.dequeued,
            released: counters.released,
            displaced: counters.displaced,
            rejected: counters.rejected,
            notifications: counters.notifications,
            abandoned,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "name": self.name,
            "capacity": self.capacity,
            "pending": self.pending,
            "free": self.free,
            "outstanding": self.outstanding,
            "enqueued": self.enqueued,
            "dequeued": self.dequeued,
            "released": self.released,
            "displaced": self.displaced,
            "rejected": self.rejected,
            "notifications": self.notifications,
            "abandoned": self.abandoned,
        })
    }
}

impl fmt::Display for QueueStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let capacity = match self.capacity {
            Some(c) => c.to_string(),
            None => "unbounded".to_string(),
        };
        write!(
            f,
            "{} capacity: {} pending: {} free: {} outstanding: {} enqueued: {} dequeued: {} \
             released: {} displaced: {} rejected: {} notifications: {}{}",
            self.name,
            capacity,
            self.pending,
            self.free,
            self.outstanding,
            self.enqueued,
            self.dequeued,
            self.released,
            self.displaced,
            self.rejected,
            self.notifications,
            if self.abandoned { " (abandoned)" } else { "" },
        )
    }
}
