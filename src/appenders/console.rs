//! Console destinations: stdout, stderr and stdlog
//!
//! Each destination owns an in-memory buffer and a writer. Entries are routed
//! by level, buffered, and written out once the buffer reaches the configured
//! threshold or immediate mode is active.

use crate::core::error::{LoggerError, Result};
use crate::core::log_level::LogLevel;
use crate::core::options::LoggerOptions;
use std::fmt;
use std::io::{self, Write};

/// Writer type accepted for a console destination
pub type ConsoleWriter = Box<dyn Write + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    Stdout,
    Stderr,
    /// The conventional diagnostic log stream; process stderr by default
    Stdlog,
}

impl Destination {
    pub fn name(&self) -> &'static str {
        match self {
            Destination::Stdout => "stdout",
            Destination::Stderr => "stderr",
            Destination::Stdlog => "stdlog",
        }
    }

    /// Whether this destination is enabled in `options`
    pub fn is_enabled(&self, options: &LoggerOptions) -> bool {
        match self {
            Destination::Stdout => options.enable_stdout,
            Destination::Stderr => options.enable_stderr,
            Destination::Stdlog => options.enable_stdlog,
        }
    }

    /// Whether an entry at `level` is routed to this destination
    pub fn accepts(&self, level: LogLevel) -> bool {
        match self {
            Destination::Stdout => level.routes_to_stdout(),
            Destination::Stderr => level.routes_to_stderr(),
            Destination::Stdlog => true,
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

struct ConsoleChannel {
    destination: Destination,
    buffer: String,
    writer: ConsoleWriter,
}

impl ConsoleChannel {
    fn new(destination: Destination, writer: ConsoleWriter) -> Self {
        Self {
            destination,
            buffer: String::new(),
            writer,
        }
    }

    fn write_through(&mut self, bytes: &[u8]) -> Result<()> {
        let destination = self.destination;
        self.writer
            .write_all(bytes)
            .and_then(|()| self.writer.flush())
            .map_err(|e| console_error(destination, e))
    }

    /// Write out the buffer.
    ///
    /// The buffer is emptied whether or not the write succeeds, so a dead
    /// writer cannot make it grow without bound.
    fn flush(&mut self) -> Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let destination = self.destination;
        let written = self
            .writer
            .write_all(self.buffer.as_bytes())
            .and_then(|()| self.writer.flush())
            .map_err(|e| console_error(destination, e));
        self.buffer.clear();
        written
    }
}

fn console_error(destination: Destination, e: io::Error) -> LoggerError {
    LoggerError::io_operation("writing to", format!("<{}>", destination), e)
}

/// Level-gated router over the three console destinations
pub struct ConsoleRouter {
    stdout: ConsoleChannel,
    stderr: ConsoleChannel,
    stdlog: ConsoleChannel,
}

impl ConsoleRouter {
    pub fn with_writers(stdout: ConsoleWriter, stderr: ConsoleWriter, stdlog: ConsoleWriter) -> Self {
        Self {
            stdout: ConsoleChannel::new(Destination::Stdout, stdout),
            stderr: ConsoleChannel::new(Destination::Stderr, stderr),
            stdlog: ConsoleChannel::new(Destination::Stdlog, stdlog),
        }
    }

    fn channel(&self, destination: Destination) -> &ConsoleChannel {
        match destination {
            Destination::Stdout => &self.stdout,
            Destination::Stderr => &self.stderr,
            Destination::Stdlog => &self.stdlog,
        }
    }

    fn channel_mut(&mut self, destination: Destination) -> &mut ConsoleChannel {
        match destination {
            Destination::Stdout => &mut self.stdout,
            Destination::Stderr => &mut self.stderr,
            Destination::Stdlog => &mut self.stdlog,
        }
    }

    /// Replace the writer of one destination. Pending bytes are flushed to
    /// the old writer first.
    pub fn set_writer(&mut self, destination: Destination, writer: ConsoleWriter) -> Result<()> {
        let channel = self.channel_mut(destination);
        channel.flush()?;
        channel.writer = writer;
        Ok(())
    }

    /// Route a formatted entry to every enabled destination that accepts
    /// `level`.
    ///
    /// A destination's buffer is written out when it reaches
    /// `flush_to_std_outputs_at_bytes`, or right away when `immediate` is set.
    /// A failing destination does not stop the others; the first error is
    /// returned once all of them were tried.
    pub fn route(
        &mut self,
        entry: &str,
        level: LogLevel,
        options: &LoggerOptions,
        immediate: bool,
    ) -> Result<()> {
        let mut result = Ok(());
        for destination in [Destination::Stdout, Destination::Stderr, Destination::Stdlog] {
            if !destination.is_enabled(options) || !destination.accepts(level) {
                continue;
            }

            let channel = self.channel_mut(destination);
            channel.buffer.push_str(entry);

            if immediate || channel.buffer.len() >= options.flush_to_std_outputs_at_bytes {
                result = result.and(channel.flush());
            }
        }
        result
    }

    /// Write `entry` to one destination immediately, after anything already
    /// buffered for it.
    pub fn write_direct(&mut self, destination: Destination, entry: &str) -> Result<()> {
        let channel = self.channel_mut(destination);
        channel.flush()?;
        channel.write_through(entry.as_bytes())
    }

    /// Flush every destination, returning the first error
    pub fn flush_all(&mut self) -> Result<()> {
        let stdout = self.stdout.flush();
        let stderr = self.stderr.flush();
        let stdlog = self.stdlog.flush();
        stdout.and(stderr).and(stdlog)
    }

    /// Bytes waiting to be written to `destination`
    pub fn buffered(&self, destination: Destination) -> &str {
        &self.channel(destination).buffer
    }

    /// Reserve `bytes` of capacity in every console buffer
    pub fn reserve(&mut self, bytes: usize) {
        for channel in [&mut self.stdout, &mut self.stderr, &mut self.stdlog] {
            if channel.buffer.capacity() < bytes {
                channel.buffer.reserve(bytes - channel.buffer.len());
            }
        }
    }
}
