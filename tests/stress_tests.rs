//! Stress tests for concurrent logging
//!
//! These tests verify:
//! - Records stay intact under concurrent writers
//! - The default logger can be swapped while other threads log
//! - Flushing concurrently with writes keeps every accepted record
//! - Span contexts stay on their threads
//! - Threshold changes race safely with logging

use std::sync::Arc;
use std::thread;

use tempfile::TempDir;
use tskv_logger::prelude::*;
use tskv_logger::{info, info_to};

#[test]
fn test_concurrent_logging_keeps_records_intact() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 250;

    let sink = Arc::new(MemorySink::new());
    let logger = Arc::new(
        Logger::builder()
            .level(Level::Trace)
            .shared_sink(Arc::clone(&sink))
            .build()
            .expect("Failed to build logger"),
    );

    let mut handles = Vec::new();
    for worker in 0..THREADS {
        let logger = Arc::clone(&logger);
        handles.push(thread::spawn(move || {
            for i in 0..PER_THREAD {
                info_to!(logger, "worker {} message {}", worker, i);
            }
        }));
    }
    for handle in handles {
        handle.join().expect("worker panicked");
    }

    let records = sink.take();
    assert_eq!(records.len(), THREADS * PER_THREAD);
    for record in &records {
        assert!(record.starts_with("timestamp="), "broken record: {record}");
        assert_eq!(record.matches("\ttext=").count(), 1);
    }
    assert_eq!(logger.metrics().emitted(), (THREADS * PER_THREAD) as u64);
}

#[test]
fn test_default_logger_swap_while_logging() {
    const WRITERS: usize = 4;
    const PER_WRITER: usize = 500;
    const SWAPS: usize = 64;

    let sink_a = Arc::new(MemorySink::new());
    let sink_b = Arc::new(MemorySink::new());
    let logger_a = Arc::new(
        Logger::builder()
            .level(Level::Trace)
            .shared_sink(Arc::clone(&sink_a))
            .build()
            .expect("Failed to build logger"),
    );
    let logger_b = Arc::new(
        Logger::builder()
            .level(Level::Trace)
            .shared_sink(Arc::clone(&sink_b))
            .build()
            .expect("Failed to build logger"),
    );

    set_default_logger(Arc::clone(&logger_a));

    let mut handles = Vec::new();
    for _ in 0..WRITERS {
        handles.push(thread::spawn(move || {
            for i in 0..PER_WRITER {
                info!("message {}", i);
            }
        }));
    }
    {
        let logger_a = Arc::clone(&logger_a);
        let logger_b = Arc::clone(&logger_b);
        handles.push(thread::spawn(move || {
            for i in 0..SWAPS {
                let next = if i % 2 == 0 {
                    Arc::clone(&logger_b)
                } else {
                    Arc::clone(&logger_a)
                };
                set_default_logger(next);
                thread::yield_now();
            }
        }));
    }
    for handle in handles {
        handle.join().expect("thread panicked");
    }
    reset_default_logger();

    // Every statement landed in exactly one of the two loggers
    let total = sink_a.take().len() + sink_b.take().len();
    assert_eq!(total, WRITERS * PER_WRITER);
}

#[test]
fn test_flush_races_with_writes() {
    const WRITERS: usize = 4;
    const PER_WRITER: usize = 200;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("stress.log");
    let logger = Arc::new(
        Logger::builder()
            .sink(FileSink::new(&log_file).expect("Failed to create sink"))
            .build()
            .expect("Failed to build logger"),
    );

    let mut handles = Vec::new();
    for worker in 0..WRITERS {
        let logger = Arc::clone(&logger);
        handles.push(thread::spawn(move || {
            for i in 0..PER_WRITER {
                info_to!(logger, "worker {} line {}", worker, i);
                if i % 50 == 0 {
                    logger.flush().expect("flush failed");
                }
            }
        }));
    }
    for handle in handles {
        handle.join().expect("worker panicked");
    }
    logger.flush().expect("final flush failed");

    let content = std::fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), WRITERS * PER_WRITER);
    for line in lines {
        assert!(line.starts_with("timestamp="), "broken line: {line}");
        assert!(line.contains("\ttext=worker "));
    }
}

#[test]
fn test_span_context_stays_on_its_thread() {
    const THREADS: usize = 6;
    const PER_THREAD: usize = 100;

    let sink = Arc::new(MemorySink::new());
    let logger = Arc::new(
        Logger::builder()
            .shared_sink(Arc::clone(&sink))
            .build()
            .expect("Failed to build logger"),
    );

    let mut handles = Vec::new();
    for worker in 0..THREADS {
        let logger = Arc::clone(&logger);
        handles.push(thread::spawn(move || {
            let _span = SpanGuard::enter(TracingContext::new(
                "stress-trace",
                format!("span-{worker}"),
            ));
            for i in 0..PER_THREAD {
                info_to!(logger, "worker {} step {}", worker, i);
            }
        }));
    }
    for handle in handles {
        handle.join().expect("worker panicked");
    }

    let records = sink.take();
    assert_eq!(records.len(), THREADS * PER_THREAD);
    for record in &records {
        let span = record
            .split("\tspan_id=")
            .nth(1)
            .expect("span_id field")
            .split('\t')
            .next()
            .unwrap();
        let worker = record
            .split("text=worker ")
            .nth(1)
            .expect("worker tag")
            .split(' ')
            .next()
            .unwrap();
        assert_eq!(span, format!("span-{worker}"));
    }
}

#[test]
fn test_concurrent_threshold_changes() {
    const WRITERS: usize = 4;
    const PER_WRITER: usize = 500;

    let sink = Arc::new(MemorySink::new());
    let logger = Arc::new(
        Logger::builder()
            .shared_sink(Arc::clone(&sink))
            .build()
            .expect("Failed to build logger"),
    );

    let mut handles = Vec::new();
    for _ in 0..WRITERS {
        let logger = Arc::clone(&logger);
        handles.push(thread::spawn(move || {
            for i in 0..PER_WRITER {
                info_to!(logger, "message {}", i);
            }
        }));
    }
    {
        let logger = Arc::clone(&logger);
        handles.push(thread::spawn(move || {
            for i in 0..128 {
                logger.set_level(if i % 2 == 0 { Level::Error } else { Level::Trace });
                thread::yield_now();
            }
            logger.set_level(Level::Info);
        }));
    }
    for handle in handles {
        handle.join().expect("thread panicked");
    }

    // Whatever passed the gate was written; nothing was torn or lost
    let records = sink.take();
    assert_eq!(logger.metrics().emitted() as usize, records.len());
    assert!(records.len() <= WRITERS * PER_WRITER);
    for record in &records {
        assert!(record.starts_with("timestamp="));
    }
}
