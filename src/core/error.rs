//! Error types for the logging core

pub type Result<T> = std::result::Result<T, LogError>;

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Sink rejected a finished record
    #[error("sink '{sink}' failed to write record: {source}")]
    SinkWrite {
        sink: String,
        #[source]
        source: std::io::Error,
    },

    /// Sink flush did not complete
    #[error("sink '{sink}' failed to flush: {source}")]
    SinkFlush {
        sink: String,
        #[source]
        source: std::io::Error,
    },

    /// Severity name not recognized
    #[error("invalid severity level: '{0}'")]
    InvalidLevel(String),

    /// Invalid configuration with details
    #[error("invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },
}

impl LogError {
    /// Create a sink write error
    pub fn sink_write(sink: impl Into<String>, source: std::io::Error) -> Self {
        LogError::SinkWrite {
            sink: sink.into(),
            source,
        }
    }

    /// Create a sink flush error
    pub fn sink_flush(sink: impl Into<String>, source: std::io::Error) -> Self {
        LogError::SinkFlush {
            sink: sink.into(),
            source,
        }
    }

    /// Create an invalid severity error
    pub fn invalid_level(name: impl Into<String>) -> Self {
        LogError::InvalidLevel(name.into())
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LogError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LogError::invalid_level("verbose");
        assert!(matches!(err, LogError::InvalidLevel(_)));

        let err = LogError::config("LoggerBuilder", "message limit must be nonzero");
        assert!(matches!(err, LogError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LogError::invalid_level("verbose");
        assert_eq!(err.to_string(), "invalid severity level: 'verbose'");

        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LogError::sink_write("file", io_err);
        assert_eq!(
            err.to_string(),
            "sink 'file' failed to write record: access denied"
        );

        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "pipe closed");
        let err = LogError::sink_flush("console", io_err);
        assert!(err.to_string().contains("failed to flush"));
    }
}
