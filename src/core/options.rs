//! Logger configuration
//!
//! [`LoggerOptions`] is a plain value: it is handed to the builder once and
//! only changes afterwards through the logger's explicit setters.

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};

/// Default console flush threshold (1 KiB)
pub const DEFAULT_FLUSH_TO_STD_OUTPUTS_AT_BYTES: usize = 1024;

/// Default rotation threshold (25 MiB)
pub const DEFAULT_SPLIT_LOG_FILE_AT_SIZE_BYTES: usize = 25 * 1024 * 1024;

/// Default file flush threshold (16 MiB)
pub const DEFAULT_FLUSH_TO_LOG_AT_BYTES: usize = 16 * 1024 * 1024;

/// Default ceiling for the `_N` rotation suffix
pub const DEFAULT_MAX_ROTATION_INDEX: usize = 100;

/// Configuration options of a [`Logger`](crate::Logger)
///
/// # Examples
///
/// ```
/// use buffered_logger::LoggerOptions;
///
/// let options = LoggerOptions::new()
///     .with_immediate_mode(false)
///     .with_split_at(64 * 1024)
///     .with_flush_to_log_at(8 * 1024);
///
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerOptions {
    /// Write the file buffer to the log file when flushed
    pub enable_file_logging: bool,

    /// Skip blocking lock acquisition; the caller serializes access
    pub lock_free_enabled: bool,

    /// Flush console buffers on every write instead of batching
    pub immediate_mode: bool,

    pub enable_stdout: bool,
    pub enable_stderr: bool,
    pub enable_stdlog: bool,

    /// Also log messages written through `cout` to the file buffer
    pub log_from_stdout: bool,
    /// Also log messages written through `cerr` to the file buffer
    pub log_from_stderr: bool,
    /// Also log messages written through `clog` to the file buffer
    pub log_from_stdlog: bool,

    /// Open the log file in append mode. When false, every open truncates.
    pub append_to_log: bool,

    pub append_newline_when_missing: bool,

    /// Rotate to a new `_N` file once `split_log_file_at_size_bytes` is reached
    pub split_log_files: bool,

    pub flush_to_std_outputs_at_bytes: usize,
    pub split_log_file_at_size_bytes: usize,
    pub flush_to_log_at_bytes: usize,

    /// Highest `_N` suffix tried when rotating
    pub max_rotation_index: usize,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            enable_file_logging: true,
            lock_free_enabled: false,
            immediate_mode: true,
            enable_stdout: true,
            enable_stderr: true,
            enable_stdlog: false,
            log_from_stdout: false,
            log_from_stderr: false,
            log_from_stdlog: false,
            append_to_log: true,
            append_newline_when_missing: false,
            split_log_files: true,
            flush_to_std_outputs_at_bytes: DEFAULT_FLUSH_TO_STD_OUTPUTS_AT_BYTES,
            split_log_file_at_size_bytes: DEFAULT_SPLIT_LOG_FILE_AT_SIZE_BYTES,
            flush_to_log_at_bytes: DEFAULT_FLUSH_TO_LOG_AT_BYTES,
            max_rotation_index: DEFAULT_MAX_ROTATION_INDEX,
        }
    }
}

impl LoggerOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with every console destination turned off
    #[must_use]
    pub fn file_only() -> Self {
        Self {
            enable_stdout: false,
            enable_stderr: false,
            enable_stdlog: false,
            ..Self::default()
        }
    }

    /// Parse options from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check threshold values
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::InvalidConfiguration`] when rotation is enabled
    /// with a zero split size or a zero rotation ceiling.
    pub fn validate(&self) -> Result<()> {
        if self.split_log_files && self.split_log_file_at_size_bytes == 0 {
            return Err(LoggerError::config(
                "LoggerOptions",
                "split_log_file_at_size_bytes must be greater than zero when split_log_files is enabled",
            ));
        }
        if self.split_log_files && self.max_rotation_index == 0 {
            return Err(LoggerError::config(
                "LoggerOptions",
                "max_rotation_index must be at least 1 when split_log_files is enabled",
            ));
        }
        Ok(())
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_file_logging(mut self, enabled: bool) -> Self {
        self.enable_file_logging = enabled;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_lock_free(mut self, enabled: bool) -> Self {
        self.lock_free_enabled = enabled;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_immediate_mode(mut self, enabled: bool) -> Self {
        self.immediate_mode = enabled;
        self
    }

    /// Enable or disable stdout, stderr and stdlog in one call
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_std_outputs(mut self, stdout: bool, stderr: bool, stdlog: bool) -> Self {
        self.enable_stdout = stdout;
        self.enable_stderr = stderr;
        self.enable_stdlog = stdlog;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_append(mut self, append: bool) -> Self {
        self.append_to_log = append;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_newline_when_missing(mut self, enabled: bool) -> Self {
        self.append_newline_when_missing = enabled;
        self
    }

    /// Enable rotation at `bytes`
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_split_at(mut self, bytes: usize) -> Self {
        self.split_log_files = true;
        self.split_log_file_at_size_bytes = bytes;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn without_split(mut self) -> Self {
        self.split_log_files = false;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_flush_to_log_at(mut self, bytes: usize) -> Self {
        self.flush_to_log_at_bytes = bytes;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_flush_to_std_outputs_at(mut self, bytes: usize) -> Self {
        self.flush_to_std_outputs_at_bytes = bytes;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_rotation_index(mut self, max_index: usize) -> Self {
        self.max_rotation_index = max_index;
        self
    }
}
