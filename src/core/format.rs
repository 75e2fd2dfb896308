//! Message formatting
//!
//! Every entry is formatted exactly once, before it is routed to any
//! destination.

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use std::fmt::{self, Write};

/// Format `message` at `level` into a new string.
///
/// Non-`None` levels are prefixed with `"<label>: "`. When
/// `newline_when_missing` is set, a trailing `'\n'` is added to non-empty
/// messages that lack one.
///
/// # Errors
///
/// Returns [`LoggerError::Formatter`] if the `Display` implementation of
/// `message` reports an error.
///
/// # Examples
///
/// ```
/// use buffered_logger::{format_entry, LogLevel};
///
/// let entry = format_entry(LogLevel::Warn, format_args!("disk at {}%", 91), true).unwrap();
/// assert_eq!(entry, "warn: disk at 91%\n");
/// ```
pub fn format_entry(
    level: LogLevel,
    message: impl fmt::Display,
    newline_when_missing: bool,
) -> Result<String> {
    let mut entry = String::new();
    format_entry_into(&mut entry, level, message, newline_when_missing)?;
    Ok(entry)
}

/// Same as [`format_entry`], appending to an existing buffer.
///
/// On error `out` is left as it was before the call.
pub fn format_entry_into(
    out: &mut String,
    level: LogLevel,
    message: impl fmt::Display,
    newline_when_missing: bool,
) -> Result<()> {
    let start = out.len();

    let written = if level == LogLevel::None {
        write!(out, "{}", message)
    } else {
        write!(out, "{}: {}", level.label(), message)
    };

    if written.is_err() {
        out.truncate(start);
        return Err(LoggerError::formatter(format!(
            "a Display implementation returned an error while formatting a {} entry",
            level
        )));
    }

    if newline_when_missing && out.len() > start && !out.ends_with('\n') {
        out.push('\n');
    }

    Ok(())
}
