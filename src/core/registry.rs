//! Process-wide default logger.
//!
//! The crate macros route through a global slot so call sites do not
//! need a logger handle. The slot starts empty; until something is
//! installed a noop fallback with a `critical` threshold keeps the
//! macros cheap and the accessors total. Replacing the logger is a
//! lock-free pointer swap, safe to do while other threads are logging.

use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwapOption;

use super::error::Result;
use super::level::Level;
use super::logger::Logger;
use crate::sinks::NoopSink;

static DEFAULT_LOGGER: ArcSwapOption<Logger> = ArcSwapOption::const_empty();

fn fallback_logger() -> &'static Arc<Logger> {
    static FALLBACK: OnceLock<Arc<Logger>> = OnceLock::new();
    FALLBACK.get_or_init(|| {
        let logger = Logger::builder()
            .level(Level::Critical)
            .sink(NoopSink)
            .build()
            .unwrap_or_default();
        Arc::new(logger)
    })
}

/// The process-wide default logger, or the noop fallback when none is
/// installed.
pub fn default_logger() -> Arc<Logger> {
    match DEFAULT_LOGGER.load_full() {
        Some(logger) => logger,
        None => Arc::clone(fallback_logger()),
    }
}

/// Install `logger` as the process-wide default and return the previous
/// one (the noop fallback when none was installed).
///
/// Records already being built keep the logger they started with;
/// statements that begin after the swap use the new one.
pub fn set_default_logger(logger: Arc<Logger>) -> Arc<Logger> {
    DEFAULT_LOGGER
        .swap(Some(logger))
        .unwrap_or_else(|| Arc::clone(fallback_logger()))
}

/// Clear the default logger slot and return what was installed.
pub fn reset_default_logger() -> Arc<Logger> {
    DEFAULT_LOGGER
        .swap(None)
        .unwrap_or_else(|| Arc::clone(fallback_logger()))
}

/// True when a record at `level` would pass the default logger's
/// threshold. Loads the slot without taking a reference on the logger.
#[inline]
pub fn log_enabled(level: Level) -> bool {
    match &*DEFAULT_LOGGER.load() {
        Some(logger) => logger.enabled(level),
        None => fallback_logger().enabled(level),
    }
}

/// Threshold of the default logger.
pub fn default_level() -> Level {
    match &*DEFAULT_LOGGER.load() {
        Some(logger) => logger.level(),
        None => fallback_logger().level(),
    }
}

/// Change the default logger's threshold. Does nothing while no logger
/// is installed.
pub fn set_default_level(level: Level) {
    if let Some(logger) = &*DEFAULT_LOGGER.load() {
        logger.set_level(level);
    }
}

/// Flush the default logger's sinks, blocking until they accept the
/// data already handed to them.
pub fn flush_default() -> Result<()> {
    default_logger().flush()
}

/// RAII guard that installs a default logger and restores the previous
/// slot state (including "empty") when dropped.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use tskv_logger::{DefaultLoggerGuard, Logger};
/// use tskv_logger::sinks::MemorySink;
///
/// let logger = Arc::new(Logger::builder().sink(MemorySink::new()).build()?);
/// {
///     let _guard = DefaultLoggerGuard::new(Arc::clone(&logger));
///     tskv_logger::info!("captured by the guarded logger");
/// }
/// # Ok::<(), tskv_logger::LogError>(())
/// ```
#[must_use = "the previous default logger is restored when the guard drops"]
pub struct DefaultLoggerGuard {
    previous: Option<Arc<Logger>>,
}

impl DefaultLoggerGuard {
    pub fn new(logger: Arc<Logger>) -> Self {
        Self {
            previous: DEFAULT_LOGGER.swap(Some(logger)),
        }
    }
}

impl Drop for DefaultLoggerGuard {
    fn drop(&mut self) {
        DEFAULT_LOGGER.swap(self.previous.take());
    }
}

/// Serializes tests that mutate the process-wide slot.
#[cfg(test)]
pub(crate) static REGISTRY_GUARD: parking_lot::Mutex<()> = parking_lot::Mutex::new(());
