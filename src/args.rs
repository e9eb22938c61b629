// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use clap::Parser;
use edgefirst_handoff::{OverflowPolicy, QueueConfig};

/// Queue overflow behaviour.
///
/// Selects what the capture thread does when the consumer falls behind and
/// the queue is full.
#[derive(clap::ValueEnum, Clone, Debug, PartialEq, Copy)]
pub enum OverflowSetting {
    /// Drop the new frame and recycle it immediately
    Reject,
    /// Recycle the oldest pending frame so the consumer sees the newest
    DropOldest,
}

impl From<OverflowSetting> for OverflowPolicy {
    fn from(setting: OverflowSetting) -> Self {
        match setting {
            OverflowSetting::Reject => OverflowPolicy::Reject,
            OverflowSetting::DropOldest => OverflowPolicy::DropOldest,
        }
    }
}

/// Command-line arguments for the EdgeFirst hand-off pipeline.
///
/// Runs a synthetic capture pipeline: a producer thread fills buffers from a
/// fixed pool at the requested frame rate and hands them to a consumer task
/// which emulates processing and releases them back to the pool. Arguments
/// can be specified via command line or environment variables.
///
/// # Example
///
/// ```bash
/// # Via command line
/// edgefirst-handoff --capacity 2 --overflow drop-oldest --process-ms 50
///
/// # Via environment variables
/// export CAPACITY=2
/// export OVERFLOW=drop-oldest
/// edgefirst-handoff
/// ```
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Maximum number of pending frames, 0 for unbounded
    #[arg(long, env = "CAPACITY", default_value = "4")]
    pub capacity: usize,

    /// Number of frame buffers attached to the pool
    #[arg(long, env = "BUFFERS", default_value = "6")]
    pub buffers: usize,

    /// Behaviour when the queue is full
    #[arg(long, env = "OVERFLOW", default_value = "reject", value_enum)]
    pub overflow: OverflowSetting,

    /// Number of frames to capture before ending the session
    #[arg(long, env = "FRAMES", default_value = "300")]
    pub frames: u64,

    /// Capture frame rate
    #[arg(long, env = "FPS", default_value = "30")]
    pub fps: u32,

    /// Emulated processing time per frame in milliseconds
    #[arg(long, env = "PROCESS_MS", default_value = "10")]
    pub process_ms: u64,

    /// Queue name used in logs and stats
    #[arg(long, env = "NAME", default_value = "camera")]
    pub name: String,

    /// Print the final queue statistics as JSON
    #[arg(long, env = "JSON")]
    pub json: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable Tokio async runtime console for debugging
    #[arg(long, env = "TOKIO_CONSOLE")]
    pub tokio_console: bool,

    /// Enable Tracy profiler for performance analysis
    #[arg(long, env = "TRACY")]
    pub tracy: bool,
}

impl From<&Args> for QueueConfig {
    fn from(args: &Args) -> Self {
        QueueConfig::new()
            .with_name(args.name.clone())
            .with_capacity(args.capacity)
            .with_overflow(args.overflow.into())
    }
}
