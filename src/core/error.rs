//! Error types for the logger system

use std::path::Path;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with the failing path
    #[error("IO error while {operation} '{path}': {source}")]
    Io {
        operation: String,
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// No unused rotation filename below the ceiling
    #[error("File rotation failed for '{path}': the max file limit of {max_index} has been reached")]
    RotationExhausted { path: String, max_index: usize },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// A `Display` implementation reported an error while formatting
    #[error("Formatter error: {message}")]
    Formatter { message: String },

    /// JSON (de)serialization error for options
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an IO error carrying the operation and the path it failed on
    pub fn io_operation(
        operation: impl Into<String>,
        path: impl AsRef<Path>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::Io {
            operation: operation.into(),
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    /// Create a rotation exhaustion error
    pub fn rotation_exhausted(path: impl AsRef<Path>, max_index: usize) -> Self {
        LoggerError::RotationExhausted {
            path: path.as_ref().display().to_string(),
            max_index,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a formatter error
    pub fn formatter(message: impl Into<String>) -> Self {
        LoggerError::Formatter {
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }

    /// OS error code of the underlying IO failure, if any
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            LoggerError::Io { source, .. } => source.raw_os_error(),
            _ => None,
        }
    }
}
