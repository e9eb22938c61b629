// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

mod args;

use args::Args;
use clap::Parser;
use edgefirst_handoff::{
    handoff, wake_signal, Consumer, DequeueError, EnqueueError, Producer, QueueConfig,
    QueueStats, Waiter,
};
use std::{
    error::Error,
    thread,
    time::{Duration, Instant},
};
use tracing::{debug, info, info_span, warn, Subscriber};
use tracing_subscriber::{
    filter::Filtered, layer::SubscriberExt, registry::LookupSpan, EnvFilter, Layer,
};

/// Synthetic camera buffer handed from the capture thread to the consumer.
#[derive(Debug)]
struct Frame {
    slot: usize,
    sequence: u64,
    captured: Instant,
}

impl Frame {
    fn new(slot: usize) -> Self {
        Self {
            slot,
            sequence: 0,
            captured: Instant::now(),
        }
    }
}

fn update_fps(prev: &mut Instant, history: &mut [i64], index: &mut usize) -> i64 {
    let now = Instant::now();

    let elapsed = now.duration_since(*prev);
    *prev = now;

    history[*index] = 1e9 as i64 / (elapsed.as_nanos() as i64).max(1);
    *index = (*index + 1) % history.len();

    (history.iter().sum::<i64>() as f64 / history.len() as f64).round() as i64
}

fn log_filter(args: &Args) -> EnvFilter {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) if args.verbose => EnvFilter::new("debug"),
        Err(_) => EnvFilter::new("info"),
    }
}

/// Gates a log sink with the `RUST_LOG`/`--verbose` level. Every sink gets
/// its own filter so the tokio console layer keeps its runtime-only one.
fn filtered<S, L>(layer: L, args: &Args) -> Filtered<L, EnvFilter, S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    L: Layer<S>,
{
    layer.with_filter(log_filter(args))
}

fn init_logging(args: &Args) -> Result<(), Box<dyn Error>> {
    tracing_log::LogTracer::init()?;

    let stdout_log = filtered(tracing_subscriber::fmt::layer(), args);

    // journald is optional, it is missing on most development hosts
    let journald = tracing_journald::layer()
        .ok()
        .map(|layer| filtered(layer, args));

    let tracy = if args.tracy {
        tracy_client::Client::start();
        Some(filtered(tracing_tracy::TracyLayer::default(), args))
    } else {
        None
    };

    let console = args
        .tokio_console
        .then(console_subscriber::spawn::<tracing_subscriber::Registry>);

    let subscriber = tracing_subscriber::registry()
        .with(console)
        .with(stdout_log)
        .with(journald)
        .with(tracy);
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_time()
        .build()?;

    runtime.block_on(async move {
        init_logging(&args)?;
        info!("EdgeFirst Handoff Pipeline");
        run(args).await
    })
}

async fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let (producer, consumer) = handoff::<Frame>(QueueConfig::from(&args));

    for slot in 0..args.buffers {
        producer.attach(Frame::new(slot))?;
    }

    let (signal, waiter) = wake_signal();
    consumer.set_listener(signal);

    let capture_args = args.clone();
    let capture_thread = thread::Builder::new()
        .name("capture".to_string())
        .spawn(move || capture(producer, &capture_args))?;

    let stats = process(consumer, waiter, Duration::from_millis(args.process_ms)).await;

    let captured = capture_thread
        .join()
        .map_err(|_| Box::<dyn Error>::from("capture thread panicked"))?;
    info!(captured, "{}", stats);

    if args.json {
        println!("{}", stats.to_json());
    }

    Ok(())
}

/// Fills pooled buffers at the configured frame rate and hands them to the
/// consumer. Returns the number of frames placed into the queue.
fn capture(producer: Producer<Frame>, args: &Args) -> u64 {
    let _span = info_span!("capture", queue = producer.name()).entered();
    let interval = Duration::from_secs_f64(1.0 / args.fps.max(1) as f64);

    let mut queued = 0;
    for sequence in 0..args.frames {
        let start = Instant::now();

        let mut frame = match producer.acquire() {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                warn!(sequence, "no free buffer, frame skipped");
                thread::sleep(interval.saturating_sub(start.elapsed()));
                continue;
            }
            Err(_) => {
                debug!("consumer ended the session");
                return queued;
            }
        };
        frame.sequence = sequence;
        frame.captured = Instant::now();

        match producer.enqueue(frame) {
            Ok(()) => queued += 1,
            Err(EnqueueError::Full(frame)) => {
                debug!(sequence, slot = frame.slot, "queue full, frame dropped");
                if producer.attach(frame).is_err() {
                    return queued;
                }
            }
            Err(EnqueueError::Abandoned(_)) => {
                debug!("consumer ended the session");
                return queued;
            }
        }

        thread::sleep(interval.saturating_sub(start.elapsed()));
    }

    // Every buffer must be back in the pool before the session is torn down.
    while producer.free_count() < args.buffers && !producer.is_abandoned() {
        thread::sleep(interval);
    }
    producer.abandon();

    queued
}

/// Waits for frames, emulates processing and returns buffers to the pool
/// until the session is abandoned.
async fn process(consumer: Consumer<Frame>, waiter: Waiter, process_time: Duration) -> QueueStats {
    let mut prev = Instant::now();
    let mut history = vec![0; 30];
    let mut index = 0;
    let mut processed = 0u64;

    'session: while waiter.wait_async().await.is_ok() {
        loop {
            let frame = match consumer.dequeue() {
                Ok(frame) => frame,
                Err(DequeueError::Empty) => break,
                Err(DequeueError::Abandoned) => break 'session,
            };

            let latency = frame.captured.elapsed();
            tokio::time::sleep(process_time).await;
            let fps = update_fps(&mut prev, &mut history, &mut index);
            processed += 1;
            debug!(
                sequence = frame.sequence,
                slot = frame.slot,
                ?latency,
                fps,
                "frame processed"
            );

            if let Err(e) = consumer.release(frame) {
                debug!("frame not returned: {}", e);
                break 'session;
            }
        }
    }

    info!(processed, "consumer finished");
    consumer.stats()
}
