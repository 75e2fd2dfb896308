//! Logging macros for ergonomic log message formatting.
//!
//! These macros accept `format!`-style arguments and format them straight
//! into the entry, without an intermediate `String`. Each returns the
//! `Result` of the underlying [`Logger::print`](crate::Logger::print).
//!
//! # Examples
//!
//! ```
//! use buffered_logger::prelude::*;
//! use buffered_logger::info;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let logger = Logger::builder(dir.path().join("macros"))
//!     .options(LoggerOptions::file_only())
//!     .build()
//!     .unwrap();
//!
//! let port = 8080;
//! info!(logger, "listening on port {}", port).unwrap();
//! assert_eq!(logger.str().unwrap(), "info: listening on port 8080");
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use buffered_logger::prelude::*;
/// # let dir = tempfile::tempdir().unwrap();
/// # let logger = Logger::builder(dir.path().join("log")).options(LoggerOptions::file_only()).build().unwrap();
/// use buffered_logger::log;
/// log!(logger, LogLevel::None, "Simple message").unwrap();
/// log!(logger, LogLevel::Error, "Error code: {}", 500).unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.print($level, format_args!($($arg)+))
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use buffered_logger::prelude::*;
/// # let dir = tempfile::tempdir().unwrap();
/// # let logger = Logger::builder(dir.path().join("err")).options(LoggerOptions::file_only()).build().unwrap();
/// use buffered_logger::error;
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error").unwrap();
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log an exception-level message.
#[macro_export]
macro_rules! exception {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Exception, $($arg)+)
    };
}
