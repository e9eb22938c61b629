// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use edgefirst_handoff::{
    handoff, DequeueError, EnqueueError, OverflowPolicy, QueueConfig, ReleaseError,
};
use std::error::Error;

#[test]
fn test_bounded_capacity() -> Result<(), Box<dyn Error>> {
    let (producer, consumer) = handoff::<char>(QueueConfig::bounded(4));

    for h in ['A', 'B', 'C', 'D'] {
        producer.enqueue(h)?;
    }
    assert_eq!(producer.pending_count(), 4);
    assert_eq!(producer.enqueue('E'), Err(EnqueueError::Full('E')));
    assert_eq!(producer.pending_count(), 4);

    assert_eq!(consumer.dequeue(), Ok('A'));
    producer.enqueue('E')?;

    for h in ['B', 'C', 'D', 'E'] {
        assert_eq!(consumer.dequeue(), Ok(h));
    }
    assert_eq!(consumer.dequeue(), Err(DequeueError::Empty));

    let stats = consumer.stats();
    assert_eq!(stats.enqueued, 5);
    assert_eq!(stats.dequeued, 5);
    assert_eq!(stats.rejected, 1);
    assert_eq!(stats.pending, 0);

    Ok(())
}

#[test]
fn test_full_returns_handle() {
    let (producer, _consumer) = handoff::<String>(QueueConfig::bounded(1));
    producer.enqueue("first".to_string()).unwrap();

    let err = producer.enqueue("second".to_string()).unwrap_err();
    assert!(err.is_full());
    assert!(!err.is_abandoned());
    assert_eq!(err.to_string(), "queue is full");
    assert_eq!(err.into_inner(), "second");
}

#[test]
fn test_unbounded() -> Result<(), Box<dyn Error>> {
    let (producer, consumer) = handoff::<u32>(QueueConfig::new());
    assert_eq!(producer.capacity(), None);

    for i in 0..10_000 {
        producer.enqueue(i)?;
    }
    assert_eq!(consumer.pending_count(), 10_000);

    for i in 0..10_000 {
        assert_eq!(consumer.dequeue(), Ok(i));
    }
    assert!(consumer.dequeue().unwrap_err().is_empty());

    Ok(())
}

#[test]
fn test_drop_oldest() -> Result<(), Box<dyn Error>> {
    let config = QueueConfig::bounded(2).with_overflow(OverflowPolicy::DropOldest);
    let (producer, consumer) = handoff::<u32>(config);

    for i in 1..=5 {
        producer.enqueue(i)?;
    }
    assert_eq!(producer.pending_count(), 2);
    assert_eq!(producer.free_count(), 3);

    // newest frames reach the consumer, stale ones are recycled in order
    assert_eq!(consumer.dequeue(), Ok(4));
    assert_eq!(consumer.dequeue(), Ok(5));
    assert_eq!(producer.acquire()?, Some(1));
    assert_eq!(producer.acquire()?, Some(2));
    assert_eq!(producer.acquire()?, Some(3));
    assert_eq!(producer.acquire()?, None);

    let stats = producer.stats();
    assert_eq!(stats.displaced, 3);
    assert_eq!(stats.rejected, 0);

    Ok(())
}

#[test]
fn test_drop_oldest_unbounded_never_displaces() -> Result<(), Box<dyn Error>> {
    let config = QueueConfig::new().with_overflow(OverflowPolicy::DropOldest);
    let (producer, consumer) = handoff::<u32>(config);

    for i in 0..100 {
        producer.enqueue(i)?;
    }
    assert_eq!(consumer.pending_count(), 100);
    assert_eq!(producer.free_count(), 0);

    Ok(())
}

#[test]
fn test_release_recycles() -> Result<(), Box<dyn Error>> {
    let (producer, consumer) = handoff::<u32>(QueueConfig::bounded(3));

    producer.attach(10)?;
    producer.attach(11)?;
    assert_eq!(producer.free_count(), 2);

    let buf = producer.acquire()?.ok_or("pool empty")?;
    assert_eq!(buf, 10);
    producer.enqueue(buf)?;

    let buf = consumer.dequeue()?;
    assert_eq!(consumer.outstanding_count(), 1);
    consumer.release(buf)?;
    assert_eq!(consumer.outstanding_count(), 0);

    // released handles are not queued again
    assert_eq!(consumer.dequeue(), Err(DequeueError::Empty));
    assert_eq!(producer.acquire()?, Some(11));
    assert_eq!(producer.acquire()?, Some(10));

    Ok(())
}

#[test]
fn test_release_without_dequeue() -> Result<(), Box<dyn Error>> {
    let (producer, consumer) = handoff::<u32>(QueueConfig::bounded(2));

    assert_eq!(consumer.release(7), Err(ReleaseError::NotOutstanding(7)));

    producer.enqueue(1)?;
    let h = consumer.dequeue()?;
    consumer.release(h)?;
    assert_eq!(consumer.release(1), Err(ReleaseError::NotOutstanding(1)));
    assert_eq!(producer.free_count(), 1);

    Ok(())
}

#[test]
fn test_config() {
    let config = QueueConfig::new()
        .with_name("preview")
        .with_capacity(3)
        .with_overflow(OverflowPolicy::DropOldest);
    assert_eq!(config.name(), "preview");
    assert_eq!(config.capacity(), Some(3));
    assert_eq!(config.overflow(), OverflowPolicy::DropOldest);
    assert_eq!(config.overflow().to_string(), "drop-oldest");

    let config = QueueConfig::default();
    assert_eq!(config.capacity(), None);
    assert_eq!(config.overflow(), OverflowPolicy::Reject);

    let (producer, consumer) = handoff::<u8>(QueueConfig::bounded(8).with_name("meta"));
    assert_eq!(producer.name(), "meta");
    assert_eq!(consumer.capacity(), Some(8));
}

#[test]
fn test_stats() -> Result<(), Box<dyn Error>> {
    let (producer, consumer) = handoff::<u32>(QueueConfig::bounded(2).with_name("stats"));
    producer.attach(100)?;
    producer.enqueue(1)?;
    producer.enqueue(2)?;
    assert!(producer.enqueue(3).is_err());
    let h = consumer.dequeue()?;
    consumer.release(h)?;
    let _held = consumer.dequeue()?;

    let stats = consumer.stats();
    assert_eq!(stats.name, "stats");
    assert_eq!(stats.capacity, Some(2));
    assert_eq!(stats.pending, 0);
    assert_eq!(stats.free, 2);
    assert_eq!(stats.outstanding, 1);
    assert_eq!(stats.enqueued, 2);
    assert_eq!(stats.dequeued, 2);
    assert_eq!(stats.released, 1);
    assert_eq!(stats.rejected, 1);
    assert!(!stats.abandoned);

    let json = stats.to_json();
    assert_eq!(json["name"], "stats");
    assert_eq!(json["capacity"], 2);
    assert_eq!(json["outstanding"], 1);
    assert_eq!(json["abandoned"], false);

    let line = stats.to_string();
    assert!(line.starts_with("stats capacity: 2 pending: 0"));
    assert!(!line.contains("abandoned"));

    consumer.abandon();
    let stats = producer.stats();
    assert!(stats.abandoned);
    assert!(stats.to_string().ends_with("(abandoned)"));
    assert_eq!(stats.free, 0);

    Ok(())
}
