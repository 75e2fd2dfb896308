//! Log level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity tag of a log entry.
///
/// The level decides the label prefixed to the message and which console
/// destinations receive it: `None`, `Info` and `Warn` go to stdout, `Error`
/// and `Exception` go to stderr, stdlog receives everything.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// No label is prefixed to the message
    #[default]
    None = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
    Exception = 4,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [
        LogLevel::None,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Exception,
    ];

    /// Label written in front of the message, empty for `None`
    pub fn label(&self) -> &'static str {
        match self {
            LogLevel::None => "",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Exception => "exception",
        }
    }

    /// Whether entries at this level are routed to stdout
    #[inline]
    pub fn routes_to_stdout(&self) -> bool {
        *self <= LogLevel::Warn
    }

    /// Whether entries at this level are routed to stderr
    #[inline]
    pub fn routes_to_stderr(&self) -> bool {
        *self >= LogLevel::Error
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::None => f.write_str("none"),
            other => f.write_str(other.label()),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "" | "none" => Ok(LogLevel::None),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "exception" => Ok(LogLevel::Exception),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}
