//! Main logger implementation
//!
//! [`Logger`] guards the file buffer, the console router and the options
//! behind one `parking_lot::RwLock`. Every mutating call takes the write side;
//! read-only queries take the read side.

use super::{
    error::Result,
    format::format_entry,
    log_level::LogLevel,
    options::LoggerOptions,
    sink::Sink,
};
use crate::appenders::console::{ConsoleRouter, ConsoleWriter, Destination};
use crate::appenders::file::FileBuffer;
use crate::appenders::rotating_file::{log_file_path, DEFAULT_EXTENSION};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Upper bound for the one-time file buffer reservation (1 MiB)
///
/// The buffer may still grow up to the flush threshold; this only caps the
/// up-front allocation.
pub const MAX_INITIAL_RESERVATION: usize = 1024 * 1024;

struct LoggerState {
    options: LoggerOptions,
    file: FileBuffer,
    console: ConsoleRouter,
    forward: Option<Arc<dyn Sink>>,
    /// One-shot immediate mode, consumed by the next write
    immediate_once: bool,
    reserved: bool,
}

impl LoggerState {
    fn reserve_capacities(&mut self) {
        if self.reserved {
            return;
        }
        self.reserved = true;

        let file_bytes = self
            .options
            .flush_to_log_at_bytes
            .min(self.options.split_log_file_at_size_bytes)
            .min(MAX_INITIAL_RESERVATION);
        self.file.reserve(file_bytes);
        self.console
            .reserve(self.options.flush_to_std_outputs_at_bytes.min(MAX_INITIAL_RESERVATION));
    }

    fn print(&mut self, level: LogLevel, message: impl fmt::Display, immediate: bool) -> Result<()> {
        self.reserve_capacities();

        let entry = format_entry(level, message, self.options.append_newline_when_missing)?;

        let once = std::mem::take(&mut self.immediate_once);
        let immediate = immediate || once || self.options.immediate_mode;
        let routed = self.console.route(&entry, level, &self.options, immediate);

        if let Some(sink) = &self.forward {
            sink.notify(&entry);
        }

        // The file receives the entry even when a console write failed
        let appended = self.file.append(&entry, &self.options);
        routed.and(appended)
    }

    fn write_direct(&mut self, destination: Destination, message: impl fmt::Display) -> Result<()> {
        let (enabled, log_from) = match destination {
            Destination::Stdout => (self.options.enable_stdout, self.options.log_from_stdout),
            Destination::Stderr => (self.options.enable_stderr, self.options.log_from_stderr),
            Destination::Stdlog => (self.options.enable_stdlog, self.options.log_from_stdlog),
        };
        if !enabled {
            return Ok(());
        }

        let entry = format_entry(
            LogLevel::None,
            message,
            self.options.append_newline_when_missing,
        )?;
        let written = self.console.write_direct(destination, &entry);

        if log_from {
            self.reserve_capacities();
            let appended = self.file.append(&entry, &self.options);
            return written.and(appended);
        }
        written
    }

    /// Flush console buffers and the file buffer, returning the first error
    fn flush_all(&mut self) -> Result<()> {
        let console = self.console.flush_all();
        let file = self.file.flush(&self.options);
        console.and(file)
    }

    /// Flush everything and drop the file handle, even if the flush failed
    fn close(&mut self) -> Result<()> {
        let flushed = self.flush_all();
        self.file.close();
        flushed
    }
}

/// Buffered logger writing to a log file and the console streams
///
/// `Logger` is `Send + Sync`; share it between threads with an `Arc`.
///
/// # Example
///
/// ```
/// use buffered_logger::{Logger, LoggerOptions};
///
/// let dir = tempfile::tempdir().unwrap();
/// let logger = Logger::builder(dir.path().join("app"))
///     .options(LoggerOptions::file_only())
///     .build()
///     .unwrap();
///
/// logger.print(buffered_logger::LogLevel::None, "Hello World").unwrap();
/// assert_eq!(logger.str().unwrap(), "Hello World");
/// ```
pub struct Logger {
    state: RwLock<LoggerState>,
    /// Mirror of `options.lock_free_enabled`, readable without the lock
    lock_free: AtomicBool,
    contention_reported: AtomicBool,
}

impl Logger {
    /// Logger with default options writing to `name_or_path`
    /// (`.log` is added when it has no extension).
    pub fn new(name_or_path: impl AsRef<Path>) -> Result<Self> {
        Self::builder(name_or_path).build()
    }

    /// Create a builder for Logger
    #[must_use]
    pub fn builder(name_or_path: impl AsRef<Path>) -> LoggerBuilder {
        LoggerBuilder::new(name_or_path)
    }

    fn report_contention(&self) {
        if !self.contention_reported.swap(true, Ordering::Relaxed) {
            eprintln!(
                "[LOGGER WARNING] Concurrent access detected in lock-free mode. \
                 Falling back to blocking locks; serialize calls or disable lock-free mode."
            );
        }
    }

    /// Exclusive access to the state.
    ///
    /// In lock-free mode the caller guarantees there is no concurrent access,
    /// so acquisition never waits. Contention means that guarantee was broken.
    fn exclusive(&self) -> RwLockWriteGuard<'_, LoggerState> {
        if self.lock_free.load(Ordering::Relaxed) {
            if let Some(guard) = self.state.try_write() {
                return guard;
            }
            self.report_contention();
        }
        self.state.write()
    }

    fn shared(&self) -> RwLockReadGuard<'_, LoggerState> {
        if self.lock_free.load(Ordering::Relaxed) {
            if let Some(guard) = self.state.try_read() {
                return guard;
            }
            self.report_contention();
        }
        self.state.read()
    }

    /// Format and write one entry.
    ///
    /// The entry is routed to the enabled console destinations, forwarded to
    /// the sink if one is set, and appended to the file buffer, flushing or
    /// rotating the log file first when a threshold is reached.
    ///
    /// # Errors
    ///
    /// Returns an IO error when a console write, a file open, or a file write
    /// fails, and a rotation error when no rotation file name is left.
    pub fn print(&self, level: LogLevel, message: impl fmt::Display) -> Result<()> {
        self.exclusive().print(level, message, false)
    }

    /// Write an entry without level label
    #[inline]
    pub fn log(&self, message: impl fmt::Display) -> Result<()> {
        self.print(LogLevel::None, message)
    }

    /// Like [`print`](Self::print), but console destinations are flushed
    /// immediately for this entry only
    pub fn write(&self, level: LogLevel, message: impl fmt::Display) -> Result<()> {
        self.exclusive().print(level, message, true)
    }

    #[inline]
    pub fn info(&self, message: impl fmt::Display) -> Result<()> {
        self.print(LogLevel::Info, message)
    }

    #[inline]
    pub fn warn(&self, message: impl fmt::Display) -> Result<()> {
        self.print(LogLevel::Warn, message)
    }

    #[inline]
    pub fn error(&self, message: impl fmt::Display) -> Result<()> {
        self.print(LogLevel::Error, message)
    }

    #[inline]
    pub fn exception(&self, message: impl fmt::Display) -> Result<()> {
        self.print(LogLevel::Exception, message)
    }

    /// Write straight to stdout, bypassing the file buffer unless
    /// `log_from_stdout` is set. No-op when stdout is disabled.
    pub fn cout(&self, message: impl fmt::Display) -> Result<()> {
        self.exclusive().write_direct(Destination::Stdout, message)
    }

    /// Write straight to stderr, bypassing the file buffer unless
    /// `log_from_stderr` is set. No-op when stderr is disabled.
    pub fn cerr(&self, message: impl fmt::Display) -> Result<()> {
        self.exclusive().write_direct(Destination::Stderr, message)
    }

    /// Write straight to stdlog, bypassing the file buffer unless
    /// `log_from_stdlog` is set. No-op when stdlog is disabled.
    pub fn clog(&self, message: impl fmt::Display) -> Result<()> {
        self.exclusive().write_direct(Destination::Stdlog, message)
    }

    /// Opportunistically flush every buffer.
    ///
    /// Returns `Ok(false)` without flushing when another call currently holds
    /// the lock, and `Ok(true)` after a flush.
    pub fn flush(&self) -> Result<bool> {
        let Some(mut state) = self.state.try_write() else {
            return Ok(false);
        };
        state.flush_all()?;
        Ok(true)
    }

    /// Flush every buffer and close the log file. Safe to call repeatedly.
    pub fn close(&self) -> Result<()> {
        self.exclusive().close()
    }

    /// Discard unflushed file bytes without writing them
    pub fn clear(&self) {
        self.exclusive().file.clear();
    }

    /// Alias of [`clear`](Self::clear)
    pub fn reset(&self) {
        self.clear();
    }

    /// Close the log file, delete it, and discard the file buffer
    pub fn remove_log_file(&self) -> Result<()> {
        let mut state = self.exclusive();
        let console = state.console.flush_all();
        let removed = state.file.remove_file();
        console.and(removed)
    }

    pub fn enable_file_logging(&self) {
        self.exclusive().options.enable_file_logging = true;
    }

    pub fn pause_file_logging(&self) {
        self.exclusive().options.enable_file_logging = false;
    }

    pub fn enable_stdout(&self) {
        self.exclusive().options.enable_stdout = true;
    }

    pub fn pause_stdout(&self) {
        self.exclusive().options.enable_stdout = false;
    }

    pub fn enable_stderr(&self) {
        self.exclusive().options.enable_stderr = true;
    }

    pub fn pause_stderr(&self) {
        self.exclusive().options.enable_stderr = false;
    }

    pub fn enable_stdlog(&self) {
        self.exclusive().options.enable_stdlog = true;
    }

    pub fn pause_stdlog(&self) {
        self.exclusive().options.enable_stdlog = false;
    }

    /// Switch between append and truncate mode.
    ///
    /// **Warning:** switching to truncate mode (`false`) closes the log file,
    /// and the next open truncates it. Existing content of the file is
    /// destroyed.
    pub fn append_mode(&self, append: bool) -> Result<()> {
        let mut state = self.exclusive();
        if state.options.append_to_log == append {
            return Ok(());
        }
        state.close()?;
        state.options.append_to_log = append;
        Ok(())
    }

    /// Permanently enable or disable immediate console flushing
    pub fn set_immediate_mode(&self, enabled: bool) {
        self.exclusive().options.immediate_mode = enabled;
    }

    /// Flush console destinations immediately on the next write only
    pub fn toggle_immediate_mode(&self) {
        self.exclusive().immediate_once = true;
    }

    /// Snapshot of the current options
    pub fn options(&self) -> LoggerOptions {
        self.shared().options.clone()
    }

    /// Change options in place.
    ///
    /// The result is validated; on error the previous options stay in
    /// effect. Changing `append_to_log` closes the log file first, as
    /// [`append_mode`](Self::append_mode) does.
    pub fn update_options(&self, update: impl FnOnce(&mut LoggerOptions)) -> Result<()> {
        let mut state = self.exclusive();
        let mut options = state.options.clone();
        update(&mut options);
        options.validate()?;

        if options.append_to_log != state.options.append_to_log {
            state.close()?;
        }
        self.lock_free
            .store(options.lock_free_enabled, Ordering::Relaxed);
        state.options = options;
        Ok(())
    }

    /// Set or clear the sink every entry is forwarded to
    pub fn set_forward(&self, sink: Option<Arc<dyn Sink>>) {
        self.exclusive().forward = sink;
    }

    /// Replace the writer of a console destination
    pub fn set_console_writer(&self, destination: Destination, writer: ConsoleWriter) -> Result<()> {
        self.exclusive().console.set_writer(destination, writer)
    }

    /// Absolute path of the file currently written to
    pub fn logfile_path(&self) -> PathBuf {
        self.shared().file.path().to_path_buf()
    }

    /// File name of the current log file
    pub fn logfile_name(&self) -> String {
        self.shared()
            .file
            .path()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Write pending bytes to the current file, close it, and continue with
    /// `new_path`. Returns the resolved absolute path.
    pub fn change_log_path(&self, new_path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = log_file_path(new_path, DEFAULT_EXTENSION)?;
        let mut state = self.exclusive();
        state.close()?;
        state.file.set_path(&path);
        Ok(path)
    }

    /// Whether the log file handle is open
    pub fn is_open(&self) -> bool {
        self.shared().file.is_open()
    }

    /// Bytes in the file buffer
    pub fn size(&self) -> usize {
        self.shared().file.len()
    }

    /// Allocated capacity of the file buffer
    pub fn capacity(&self) -> usize {
        self.shared().file.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.shared().file.is_empty()
    }

    /// Truncate or NUL-pad the file buffer to `len` bytes
    pub fn resize(&self, len: usize) {
        self.exclusive().file.resize(len);
    }

    pub fn shrink_to_fit(&self) {
        self.exclusive().file.shrink_to_fit();
    }

    /// Close the logger and read back the current log file.
    ///
    /// Returns an empty string if the file does not exist.
    pub fn str(&self) -> Result<String> {
        let mut state = self.exclusive();
        state.close()?;
        state.file.read_file()
    }

    /// Alias of [`str`](Self::str)
    #[allow(clippy::inherent_to_string)]
    pub fn to_string(&self) -> Result<String> {
        self.str()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.state.get_mut().close() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("path", &self.logfile_path())
            .field("lock_free", &self.lock_free.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use buffered_logger::prelude::*;
///
/// let dir = tempfile::tempdir().unwrap();
/// let logger = Logger::builder(dir.path().join("results"))
///     .extension("md")
///     .options(LoggerOptions::file_only().with_split_at(64 * 1024))
///     .build()
///     .unwrap();
///
/// assert_eq!(logger.logfile_name(), "results.md");
/// ```
pub struct LoggerBuilder {
    name_or_path: PathBuf,
    extension: String,
    options: LoggerOptions,
    stdout: Option<ConsoleWriter>,
    stderr: Option<ConsoleWriter>,
    stdlog: Option<ConsoleWriter>,
    forward: Option<Arc<dyn Sink>>,
}

impl LoggerBuilder {
    /// Create a new builder with default options
    pub fn new(name_or_path: impl AsRef<Path>) -> Self {
        Self {
            name_or_path: name_or_path.as_ref().to_path_buf(),
            extension: DEFAULT_EXTENSION.to_string(),
            options: LoggerOptions::default(),
            stdout: None,
            stderr: None,
            stdlog: None,
            forward: None,
        }
    }

    /// Extension used when the path has none, both for the initial file and
    /// for rotated files
    #[must_use = "builder methods return a new value"]
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn options(mut self, options: LoggerOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn stdout_writer<W: io::Write + Send + Sync + 'static>(mut self, writer: W) -> Self {
        self.stdout = Some(Box::new(writer));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn stderr_writer<W: io::Write + Send + Sync + 'static>(mut self, writer: W) -> Self {
        self.stderr = Some(Box::new(writer));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn stdlog_writer<W: io::Write + Send + Sync + 'static>(mut self, writer: W) -> Self {
        self.stdlog = Some(Box::new(writer));
        self
    }

    /// Forward every formatted entry to `sink`
    #[must_use = "builder methods return a new value"]
    pub fn forward_to<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.forward = Some(Arc::new(sink));
        self
    }

    /// Build the Logger
    ///
    /// # Errors
    ///
    /// Returns an error if the options are invalid or the log path cannot be
    /// resolved. The log file itself is opened lazily on the first write.
    pub fn build(self) -> Result<Logger> {
        self.options.validate()?;
        let path = log_file_path(&self.name_or_path, &self.extension)?;

        let console = ConsoleRouter::with_writers(
            self.stdout.unwrap_or_else(|| Box::new(io::stdout())),
            self.stderr.unwrap_or_else(|| Box::new(io::stderr())),
            self.stdlog.unwrap_or_else(|| Box::new(io::stderr())),
        );

        let lock_free = self.options.lock_free_enabled;
        let state = LoggerState {
            options: self.options,
            file: FileBuffer::new(path, self.extension),
            console,
            forward: self.forward,
            immediate_once: false,
            reserved: false,
        };

        Ok(Logger {
            state: RwLock::new(state),
            lock_free: AtomicBool::new(lock_free),
            contention_reported: AtomicBool::new(false),
        })
    }
}
