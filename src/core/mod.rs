//! Core logger types and traits

pub mod error;
pub mod format;
pub mod log_level;
pub mod logger;
pub mod options;
pub mod sink;
pub mod stream;

pub use error::{LoggerError, Result};
pub use format::{format_entry, format_entry_into};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder, MAX_INITIAL_RESERVATION};
pub use options::LoggerOptions;
pub use sink::{ChannelSink, Sink};
pub use stream::LogStream;
