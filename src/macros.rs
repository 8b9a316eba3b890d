//! Logging macros for ergonomic record construction.
//!
//! The macros check the threshold before touching their arguments, so a
//! disabled statement costs one atomic load and nothing else: format
//! arguments are not evaluated and no record is built. `log!` and the
//! level shorthands write through the process-wide default logger; the
//! `*_to!` variants take an explicit logger.
//!
//! # Examples
//!
//! ```
//! use tskv_logger::{info, warning};
//!
//! let port = 8080;
//! info!("Server listening on port {}", port);
//! warning!("Low disk space: {} MB left", 512);
//! ```

/// Log a message through the default logger.
///
/// Arguments are evaluated only when `$level` passes the default
/// logger's threshold.
///
/// # Examples
///
/// ```
/// use tskv_logger::{log, Level};
///
/// log!(Level::Info, "Simple message");
/// log!(Level::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($level:expr, $($arg:tt)+) => {{
        let level = $level;
        if $crate::log_enabled(level) {
            $crate::default_logger()
                .record(level)
                .location(file!(), line!(), module_path!())
                .append(format_args!($($arg)+));
        }
    }};
}

/// Log a message through an explicit logger.
///
/// # Examples
///
/// ```
/// use tskv_logger::{log_to, Level, Logger};
///
/// let logger = Logger::builder().build()?;
/// log_to!(logger, Level::Info, "request {} done", 17);
/// # Ok::<(), tskv_logger::LogError>(())
/// ```
#[macro_export]
macro_rules! log_to {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        let level = $level;
        if logger.enabled(level) {
            logger
                .record(level)
                .location(file!(), line!(), module_path!())
                .append(format_args!($($arg)+));
        }
    }};
}

/// Log a trace-level message through the default logger.
///
/// # Examples
///
/// ```
/// use tskv_logger::trace;
///
/// trace!("entering handler");
/// trace!("cursor at {}", 42);
/// ```
#[macro_export]
macro_rules! trace {
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Trace, $($arg)+)
    };
}

/// Log a debug-level message through the default logger.
///
/// # Examples
///
/// ```
/// use tskv_logger::debug;
///
/// debug!("cache warmed");
/// debug!("counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Debug, $($arg)+)
    };
}

/// Log an info-level message through the default logger.
///
/// # Examples
///
/// ```
/// use tskv_logger::info;
///
/// info!("application started");
/// info!("processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Info, $($arg)+)
    };
}

/// Log a warning-level message through the default logger.
///
/// # Examples
///
/// ```
/// use tskv_logger::warning;
///
/// warning!("low disk space");
/// warning!("retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warning {
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Warning, $($arg)+)
    };
}

/// Log an error-level message through the default logger.
///
/// # Examples
///
/// ```
/// use tskv_logger::error;
///
/// error!("failed to connect to database");
/// error!("error code: {}", 500);
/// ```
#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Error, $($arg)+)
    };
}

/// Log a critical-level message through the default logger.
///
/// # Examples
///
/// ```
/// use tskv_logger::critical;
///
/// critical!("unable to recover: {}", "disk full");
/// ```
#[macro_export]
macro_rules! critical {
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Critical, $($arg)+)
    };
}

/// Log a trace-level message through an explicit logger.
#[macro_export]
macro_rules! trace_to {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_to!($logger, $crate::Level::Trace, $($arg)+)
    };
}

/// Log a debug-level message through an explicit logger.
#[macro_export]
macro_rules! debug_to {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_to!($logger, $crate::Level::Debug, $($arg)+)
    };
}

/// Log an info-level message through an explicit logger.
#[macro_export]
macro_rules! info_to {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_to!($logger, $crate::Level::Info, $($arg)+)
    };
}

/// Log a warning-level message through an explicit logger.
#[macro_export]
macro_rules! warning_to {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_to!($logger, $crate::Level::Warning, $($arg)+)
    };
}

/// Log an error-level message through an explicit logger.
#[macro_export]
macro_rules! error_to {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_to!($logger, $crate::Level::Error, $($arg)+)
    };
}

/// Log a critical-level message through an explicit logger.
#[macro_export]
macro_rules! critical_to {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_to!($logger, $crate::Level::Critical, $($arg)+)
    };
}
