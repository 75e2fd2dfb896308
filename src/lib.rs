//! # Buffered Logger
//!
//! A buffered, configurable logging facility writing to a log file and the
//! console streams.
//!
//! ## Features
//!
//! - **Buffered file output**: entries collect in memory and are written in
//!   large batches
//! - **Size-based rotation**: full files roll over to `name_1.log`,
//!   `name_2.log`, ...
//! - **Level routing**: warnings and below go to stdout, errors to stderr
//! - **Thread Safe**: one logger can be shared through an `Arc`
//!
//! ## Example
//!
//! ```
//! use buffered_logger::prelude::*;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let logger = Logger::builder(dir.path().join("service"))
//!     .options(LoggerOptions::file_only().with_newline_when_missing(true))
//!     .build()
//!     .unwrap();
//!
//! logger.info("service started").unwrap();
//! logger.warn(format_args!("{} retries left", 2)).unwrap();
//!
//! assert_eq!(
//!     logger.str().unwrap(),
//!     "info: service started\nwarn: 2 retries left\n"
//! );
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleWriter, Destination};
    pub use crate::core::{
        ChannelSink, LogLevel, LogStream, Logger, LoggerBuilder, LoggerError, LoggerOptions,
        Result, Sink,
    };
}

pub use appenders::{
    log_file_path, next_available_filename, ConsoleRouter, ConsoleWriter, Destination,
    FileBuffer, DEFAULT_EXTENSION,
};
pub use core::{
    format_entry, format_entry_into, ChannelSink, LogLevel, LogStream, Logger, LoggerBuilder,
    LoggerError, LoggerOptions, Result, Sink, MAX_INITIAL_RESERVATION,
};
