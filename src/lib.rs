//! # tskv Logger
//!
//! A structured logging core that renders each record as one
//! tab-separated `key=value` (tskv) line.
//!
//! ## Features
//!
//! - **Cheap disabled statements**: macros check the threshold before
//!   evaluating any argument
//! - **Typed rendering**: values are appended through [`LogValue`], with
//!   escaping decided per value category
//! - **Multiple sinks**: console, file, in-memory and custom sinks
//! - **Thread safe**: loggers are shared freely and replaceable at
//!   runtime; each record is built on one thread and written exactly once

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        default_level, default_logger, escape, flush_default, log_enabled, reset_default_logger,
        set_default_level, set_default_logger, unescape, AsDebug, AsDisplay, DefaultLoggerGuard,
        EscapeMode, ExtraValue, Hex, HexShort, Level, LogError, LogExtra, LogValue, Logger,
        LoggerBuilder, LoggerMetrics, MetricsSnapshot, RecordBuilder, Result, Sequence, Sink,
        SpanGuard, TracingContext, DEFAULT_MESSAGE_LIMIT, RECORD_TIMESTAMP_FORMAT,
    };
    #[cfg(feature = "console")]
    pub use crate::sinks::ConsoleSink;
    pub use crate::sinks::{FileSink, MemorySink, NoopSink};
}

pub use crate::core::{
    default_level, default_logger, escape, flush_default, log_enabled, reset_default_logger,
    set_default_level, set_default_logger, unescape, AsDebug, AsDisplay, DefaultLoggerGuard,
    EscapeMode, ExtraValue, Hex, HexShort, Level, LogError, LogExtra, LogValue, Logger,
    LoggerBuilder, LoggerMetrics, MetricsSnapshot, RecordBuilder, Result, Sequence, Sink,
    SpanGuard, TracingContext, DEFAULT_MESSAGE_LIMIT, RECORD_TIMESTAMP_FORMAT,
};
