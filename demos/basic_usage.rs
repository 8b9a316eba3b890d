//! Basic logger usage example
//!
//! Demonstrates the default-logger macros, typed record building and
//! span context with console and file sinks.
//!
//! Run with: cargo run --example basic_usage

use std::sync::Arc;

use tskv_logger::prelude::*;
use tskv_logger::{debug, error, info, trace, warning};

fn main() -> Result<()> {
    println!("=== tskv Logger - Basic Usage Example ===\n");

    // Console plus a tskv file, sharing one threshold
    let logger = Arc::new(
        Logger::builder()
            .level(Level::Trace)
            .sink(ConsoleSink::new())
            .sink(FileSink::new("basic_usage.log")?)
            .build()?,
    );
    set_default_logger(Arc::clone(&logger));

    println!("1. Logging at different levels:");
    trace!("connection pool sized to {}", 8);
    debug!("cache warmed in {}ms", 12.5);
    info!("service listening on {}", "0.0.0.0:8080");
    warning!("config file missing, using defaults");
    error!("upstream {} refused the handshake", "billing");

    println!("\n2. Structured fields and typed values:");
    logger
        .record(Level::Info)
        .extra("user_id", 42i64)
        .extra("cache_hit", true)
        .append("profile loaded");
    logger
        .record(Level::Debug)
        .append("flags ")
        .append(Hex::new(0x00ffu32))
        .append(" retries ")
        .append(HexShort::new(0x2au64));
    logger.record(Level::Info).append(&[1u32, 2, 3][..]);

    println!("\n3. Raising the threshold hides verbose records:");
    set_default_level(Level::Warning);
    debug!("this allocation report is skipped");
    warning!("still visible above the new threshold");
    set_default_level(Level::Trace);

    println!("\n4. Span context rides along automatically:");
    {
        let _span = SpanGuard::enter(TracingContext::new("req-7f3a", "handler-1"));
        info!("handling request");
        info!("request done");
    }
    info!("outside the span again");

    // Flush so the file has everything before exit
    flush_default()?;
    reset_default_logger();

    println!("\n=== Example completed successfully! ===");
    println!("Check 'basic_usage.log' for the tskv records");

    Ok(())
}
