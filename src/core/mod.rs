//! Core logging types and traits

pub mod context;
pub mod encoding;
pub mod error;
pub mod extra;
pub mod level;
pub mod logger;
pub mod metrics;
pub mod record;
pub mod registry;
pub mod sink;
pub mod timestamp;
pub mod value;

pub use context::{SpanGuard, TracingContext};
pub use encoding::{escape, unescape, EscapeMode};
pub use error::{LogError, Result};
pub use extra::{ExtraValue, LogExtra};
pub use level::Level;
pub use logger::{Logger, LoggerBuilder, DEFAULT_MESSAGE_LIMIT};
pub use metrics::{LoggerMetrics, MetricsSnapshot};
pub use record::RecordBuilder;
pub use registry::{
    default_level, default_logger, flush_default, log_enabled, reset_default_logger,
    set_default_level, set_default_logger, DefaultLoggerGuard,
};
pub use sink::Sink;
pub use timestamp::RECORD_TIMESTAMP_FORMAT;
pub use value::{AsDebug, AsDisplay, Hex, HexShort, LogValue, Sequence};
