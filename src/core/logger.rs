//! Logger front end.
//!
//! A [`Logger`] owns a threshold, a message limit and a set of sinks.
//! Records are built through [`Logger::record`] (usually via the crate
//! macros) and fan out to every sink when the builder drops. Sink
//! failures never reach the logging call site: they are counted in the
//! logger's metrics and surfaced through a rate-limited stderr alert.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use super::error::{LogError, Result};
use super::level::Level;
use super::metrics::LoggerMetrics;
use super::record::RecordBuilder;
use super::sink::Sink;

/// Default cap on a record's free-text body, in bytes.
///
/// Used when [`LoggerBuilder::message_limit`] is not called. Reserved
/// fields and extras are not counted against it.
pub const DEFAULT_MESSAGE_LIMIT: usize = 10_000;

pub struct Logger {
    name: String,
    level: AtomicU8,
    sinks: Vec<Arc<dyn Sink>>,
    message_limit: usize,
    metrics: LoggerMetrics,
}

impl Logger {
    /// Create a logger with the default threshold and no sinks.
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: String::from("default"),
            level: AtomicU8::new(Level::Info as u8),
            sinks: Vec::new(),
            message_limit: DEFAULT_MESSAGE_LIMIT,
            metrics: LoggerMetrics::new(),
        }
    }

    /// Create a builder for Logger.
    ///
    /// # Example
    /// ```
    /// use tskv_logger::{Level, Logger};
    /// use tskv_logger::sinks::ConsoleSink;
    ///
    /// let logger = Logger::builder()
    ///     .level(Level::Debug)
    ///     .sink(ConsoleSink::stderr())
    ///     .build()?;
    ///
    /// logger.record(Level::Info).append("server started");
    /// # Ok::<(), tskv_logger::LogError>(())
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// True when records at `level` pass this logger's threshold.
    #[inline]
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.level()
    }

    /// The current threshold.
    pub fn level(&self) -> Level {
        Level::from_repr(self.level.load(Ordering::Relaxed))
    }

    /// Change the threshold. Takes effect for records started afterwards.
    pub fn set_level(&self, level: Level) {
        self.level.store(level as u8, Ordering::Relaxed);
    }

    /// Start a record at `level`.
    ///
    /// The record is written when the returned builder drops. Below the
    /// threshold the builder is inert and nothing is written.
    pub fn record(&self, level: Level) -> RecordBuilder<'_> {
        RecordBuilder::new(self, level)
    }

    /// Name used in diagnostics about this logger.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn message_limit(&self) -> usize {
        self.message_limit
    }

    /// Counters for emitted and dropped records.
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Flush every sink, stopping at the first failure.
    pub fn flush(&self) -> Result<()> {
        for sink in &self.sinks {
            sink.flush()?;
        }
        Ok(())
    }

    /// Hand a finished record to every sink.
    ///
    /// A record counts as emitted when at least one sink accepts it and
    /// as dropped when every sink rejects it. Panicking sinks are
    /// isolated so the logging call site never unwinds.
    pub(crate) fn dispatch(&self, level: Level, record: &str) {
        if self.sinks.is_empty() {
            self.metrics.record_emitted();
            return;
        }

        let mut delivered = false;
        let mut last_failure: Option<String> = None;

        for sink in &self.sinks {
            let outcome = catch_unwind(AssertUnwindSafe(|| sink.write(level, record)));
            match outcome {
                Ok(Ok(())) => delivered = true,
                Ok(Err(e)) => last_failure = Some(e.to_string()),
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        (*s).to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "unknown panic".to_string()
                    };
                    eprintln!(
                        "[LOGGER CRITICAL] Sink '{}' panicked: {}. \
                         Other sinks continue to function.",
                        sink.name(),
                        panic_msg
                    );
                    last_failure = Some(panic_msg);
                }
            }
        }

        if delivered {
            self.metrics.record_emitted();
        } else {
            self.alert_and_drop(last_failure);
        }
    }

    /// Count a fully rejected record, alerting on the first drop and
    /// every 1000th thereafter.
    fn alert_and_drop(&self, reason: Option<String>) {
        let dropped_count = self.metrics.record_dropped();

        let should_alert = dropped_count == 0 || (dropped_count + 1) % 1000 == 0;
        if should_alert {
            eprintln!(
                "[LOGGER WARNING] Logger '{}' dropped {} records, every sink rejected the last one: {}",
                self.name,
                dropped_count + 1,
                reason.as_deref().unwrap_or("no failure reported")
            );
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing Logger with a fluent API.
///
/// # Example
/// ```
/// use tskv_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .level(Level::Debug)
///     .sink(ConsoleSink::stdout())
///     .message_limit(4096)
///     .build()?;
/// # let _ = logger;
/// # Ok::<(), tskv_logger::LogError>(())
/// ```
pub struct LoggerBuilder {
    name: String,
    level: Level,
    sinks: Vec<Arc<dyn Sink>>,
    message_limit: usize,
}

impl LoggerBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self {
            name: String::from("default"),
            level: Level::Info,
            sinks: Vec::new(),
            message_limit: DEFAULT_MESSAGE_LIMIT,
        }
    }

    /// Name this logger in diagnostics.
    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the threshold below which records are discarded.
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Add a sink.
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sinks.push(Arc::new(sink));
        self
    }

    /// Add an already shared sink, keeping the caller's handle usable.
    #[must_use = "builder methods return a new value"]
    pub fn shared_sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Cap each record's free-text body at `limit` bytes.
    #[must_use = "builder methods return a new value"]
    pub fn message_limit(mut self, limit: usize) -> Self {
        self.message_limit = limit;
        self
    }

    /// Build the Logger.
    pub fn build(self) -> Result<Logger> {
        if self.message_limit == 0 {
            return Err(LogError::config(
                "LoggerBuilder",
                "message limit must be greater than zero",
            ));
        }
        Ok(Logger {
            name: self.name,
            level: AtomicU8::new(self.level as u8),
            sinks: self.sinks,
            message_limit: self.message_limit,
            metrics: LoggerMetrics::new(),
        })
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
