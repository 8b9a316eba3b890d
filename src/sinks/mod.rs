//! Built-in sinks.
//!
//! A sink receives finished records and owns their framing: each record
//! arrives without a trailing newline and is written as one line.

#[cfg(feature = "console")]
pub mod console;
pub mod file;
pub mod memory;
pub mod noop;

#[cfg(feature = "console")]
pub use console::ConsoleSink;
pub use file::FileSink;
pub use memory::MemorySink;
pub use noop::NoopSink;
