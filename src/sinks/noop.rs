//! Sink that discards everything.

use crate::core::error::Result;
use crate::core::level::Level;
use crate::core::sink::Sink;

/// Sink that accepts and discards every record.
///
/// Backs the default-logger fallback so logging before setup stays
/// valid.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl NoopSink {
    pub fn new() -> Self {
        Self
    }
}

impl Sink for NoopSink {
    fn write(&self, _level: Level, _record: &str) -> Result<()> {
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "noop"
    }
}
