//! File buffer with size-based flushing and rotation
//!
//! Entries accumulate in memory and reach the disk in whole-buffer writes.
//! Once the current file plus the buffer would reach the split threshold the
//! buffer is flushed, the file closed, and writing continues in the next
//! available `base_N.ext` file.

use super::rotating_file::next_available_filename;
use crate::core::error::{LoggerError, Result};
use crate::core::options::LoggerOptions;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct FileBuffer {
    path: PathBuf,
    default_extension: String,
    buffer: String,
    file: Option<File>,
    /// Length of the open file on disk
    file_bytes: u64,
}

impl FileBuffer {
    pub fn new(path: impl Into<PathBuf>, default_extension: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            default_extension: default_extension.into(),
            buffer: String::new(),
            file: None,
            file_bytes: 0,
        }
    }

    /// Path of the file currently written to
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Point the buffer at another file.
    ///
    /// The current handle is dropped without flushing; callers flush first.
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.close();
        self.path = path.into();
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    #[must_use]
    pub fn contents(&self) -> &str {
        &self.buffer
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    pub fn reserve(&mut self, bytes: usize) {
        if self.buffer.capacity() < bytes {
            self.buffer.reserve(bytes - self.buffer.len());
        }
    }

    /// Discard buffered bytes without writing them
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Truncate or NUL-pad the buffer to `len` bytes.
    ///
    /// Truncation backs off to the previous character boundary, so the result
    /// may be shorter than `len` when it would split a multi-byte character.
    pub fn resize(&mut self, len: usize) {
        if len <= self.buffer.len() {
            let mut cut = len;
            while !self.buffer.is_char_boundary(cut) {
                cut -= 1;
            }
            self.buffer.truncate(cut);
        } else {
            let missing = len - self.buffer.len();
            self.buffer.extend(std::iter::repeat('\0').take(missing));
        }
    }

    pub fn shrink_to_fit(&mut self) {
        self.buffer.shrink_to_fit();
    }

    /// Open the log file unless it is already open.
    ///
    /// Missing parent directories are created. With `append` false an
    /// existing file is truncated.
    pub fn open(&mut self, append: bool) -> Result<()> {
        if self.file.is_some() {
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    LoggerError::io_operation("creating log directory", parent, e)
                })?;
            }
        }

        let mut open_options = OpenOptions::new();
        open_options.create(true);
        if append {
            open_options.append(true);
        } else {
            open_options.write(true).truncate(true);
        }

        let file = open_options
            .open(&self.path)
            .map_err(|e| LoggerError::io_operation("opening log file", &self.path, e))?;

        self.file_bytes = if append {
            file.metadata()
                .map_err(|e| LoggerError::io_operation("reading metadata of", &self.path, e))?
                .len()
        } else {
            0
        };
        self.file = Some(file);
        Ok(())
    }

    /// Drop the file handle. Buffered bytes are kept.
    pub fn close(&mut self) {
        self.file = None;
        self.file_bytes = 0;
    }

    /// Write the whole buffer to disk and clear it.
    ///
    /// With file logging disabled the buffer is discarded. On a failed write
    /// the buffer is left untouched so the caller may retry.
    pub fn flush(&mut self, options: &LoggerOptions) -> Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }

        if options.enable_file_logging {
            self.open(options.append_to_log)?;
            self.write_buffer()?;
        }

        self.buffer.clear();
        Ok(())
    }

    fn write_buffer(&mut self) -> Result<()> {
        let Some(file) = self.file.as_mut() else {
            return Err(LoggerError::other("log file is not open"));
        };

        file.write_all(self.buffer.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| LoggerError::io_operation("writing log file", &self.path, e))?;

        self.file_bytes += self.buffer.len() as u64;
        Ok(())
    }

    /// Flush, close, and move on to the next available file name.
    ///
    /// The next name is resolved first. When no name is left, the open
    /// file and the buffer are left as they were.
    fn rotate(&mut self, options: &LoggerOptions) -> Result<()> {
        let next = if options.enable_file_logging {
            Some(next_available_filename(
                &self.path,
                &self.default_extension,
                options.max_rotation_index,
            )?)
        } else {
            None
        };

        self.flush(options)?;
        self.close();

        if let Some(next) = next {
            self.path = next;
        }
        Ok(())
    }

    /// Append a formatted entry, flushing or rotating first when a threshold
    /// is reached.
    ///
    /// The entry that triggers a rotation becomes the first entry of the new
    /// file. A rotation is only started when the current file or buffer
    /// already holds bytes, so an oversized entry on a fresh file does not
    /// burn through rotation indices.
    pub fn append(&mut self, entry: &str, options: &LoggerOptions) -> Result<()> {
        if options.enable_file_logging {
            self.open(options.append_to_log)?;
        }

        let existing = self.file_bytes + self.buffer.len() as u64;
        let projected = existing + entry.len() as u64;

        if options.split_log_files
            && existing > 0
            && projected >= options.split_log_file_at_size_bytes as u64
        {
            self.rotate(options)?;
            if options.enable_file_logging {
                self.open(options.append_to_log)?;
            }
        } else if self.buffer.len() >= options.flush_to_log_at_bytes {
            self.flush(options)?;
        }

        self.buffer.push_str(entry);
        Ok(())
    }

    /// Read the current log file, or an empty string if it does not exist.
    pub fn read_file(&self) -> Result<String> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(LoggerError::io_operation("reading log file", &self.path, e)),
        }
    }

    /// Close and delete the current log file, discarding the buffer.
    pub fn remove_file(&mut self) -> Result<()> {
        self.close();
        self.buffer.clear();
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(LoggerError::io_operation("removing log file", &self.path, e)),
        }
    }
}

impl Drop for FileBuffer {
    fn drop(&mut self) {
        // Best effort flush of the OS stream; buffered bytes are the
        // logger's responsibility
        if let Some(mut file) = self.file.take() {
            let _ = file.flush();
        }
    }
}
