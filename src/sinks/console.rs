//! Console sink implementation.

use std::io::{self, Write};

use colored::Colorize;

use crate::core::error::{LogError, Result};
use crate::core::level::Level;
use crate::core::sink::Sink;

#[derive(Debug, Clone, Copy)]
enum Target {
    /// Route by severity: `error` and above to stderr, the rest to stdout.
    Auto,
    Stdout,
    Stderr,
}

/// Sink that writes one record per line to the process console.
///
/// By default `error` and `critical` records go to standard error and
/// everything else to standard output. Colors are applied per record
/// level and follow the `colored` crate's environment handling
/// (`NO_COLOR`, non-tty output).
pub struct ConsoleSink {
    target: Target,
    use_colors: bool,
}

impl ConsoleSink {
    /// Sink with severity-based stream routing.
    #[must_use]
    pub fn new() -> Self {
        Self {
            target: Target::Auto,
            use_colors: true,
        }
    }

    /// Sink pinned to standard output for every level.
    pub fn stdout() -> Self {
        Self {
            target: Target::Stdout,
            use_colors: true,
        }
    }

    /// Sink pinned to standard error for every level.
    pub fn stderr() -> Self {
        Self {
            target: Target::Stderr,
            use_colors: true,
        }
    }

    /// Enable or disable colored output.
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn use_stderr(&self, level: Level) -> bool {
        match self.target {
            Target::Auto => level >= Level::Error,
            Target::Stdout => false,
            Target::Stderr => true,
        }
    }

    fn write_line(&self, out: &mut impl Write, level: Level, record: &str) -> io::Result<()> {
        if self.use_colors {
            writeln!(out, "{}", record.color(level.color()))
        } else {
            writeln!(out, "{record}")
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn write(&self, level: Level, record: &str) -> Result<()> {
        let outcome = if self.use_stderr(level) {
            self.write_line(&mut io::stderr().lock(), level, record)
        } else {
            self.write_line(&mut io::stdout().lock(), level, record)
        };
        outcome.map_err(|e| LogError::sink_write(self.name(), e))
    }

    fn flush(&self) -> Result<()> {
        // Auto mode writes to both streams
        io::stdout()
            .flush()
            .and_then(|()| io::stderr().flush())
            .map_err(|e| LogError::sink_flush(self.name(), e))
    }

    fn name(&self) -> &str {
        "console"
    }
}
