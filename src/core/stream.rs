//! Fluent accumulator for building one entry from several pieces
//!
//! Collects heterogeneous values and hands them to the logger as a single
//! formatted entry when finished.

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::logger::Logger;
use std::fmt::{self, Write};

/// Builder that accumulates values into one log entry
///
/// # Example
///
/// ```
/// use buffered_logger::{LogLevel, Logger, LoggerOptions};
///
/// let dir = tempfile::tempdir().unwrap();
/// let logger = Logger::builder(dir.path().join("stream"))
///     .options(LoggerOptions::file_only())
///     .build()
///     .unwrap();
///
/// logger
///     .stream(LogLevel::Info)
///     .push("thread ")
///     .push(7)
///     .push(" handled ")
///     .push(3.5)
///     .finish()
///     .unwrap();
///
/// assert_eq!(logger.str().unwrap(), "info: thread 7 handled 3.5");
/// ```
#[must_use = "a LogStream does nothing until `finish` is called"]
pub struct LogStream<'a> {
    logger: &'a Logger,
    level: LogLevel,
    message: String,
    immediate: bool,
    error: Option<LoggerError>,
}

impl<'a> LogStream<'a> {
    pub fn new(logger: &'a Logger, level: LogLevel) -> Self {
        Self {
            logger,
            level,
            message: String::new(),
            immediate: false,
            error: None,
        }
    }

    /// Append a value
    pub fn push(mut self, value: impl fmt::Display) -> Self {
        if self.error.is_none() && write!(self.message, "{}", value).is_err() {
            self.error = Some(LoggerError::formatter(
                "a Display implementation returned an error while streaming",
            ));
        }
        self
    }

    /// Flush console destinations as soon as the entry is written
    pub fn immediate(mut self) -> Self {
        self.immediate = true;
        self
    }

    /// Write the accumulated entry
    ///
    /// # Errors
    ///
    /// Returns the first formatting error seen by [`push`](Self::push), or
    /// any error from writing the entry.
    pub fn finish(self) -> Result<()> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if self.immediate {
            self.logger.write(self.level, &self.message)
        } else {
            self.logger.print(self.level, &self.message)
        }
    }
}

impl Logger {
    /// Start a [`LogStream`] at `level`
    pub fn stream(&self, level: LogLevel) -> LogStream<'_> {
        LogStream::new(self, level)
    }
}
