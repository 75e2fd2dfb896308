//! Log file naming and the rotation filename scheme
//!
//! Rotation never renames existing files. Instead the logger moves on to the
//! next unused `base_N.ext` sibling of the current file.

use crate::core::error::{LoggerError, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Extension used when neither the path nor the caller provides one
pub const DEFAULT_EXTENSION: &str = ".log";

/// Normalize an extension to its dotted form (`"md"` -> `".md"`)
fn dotted(extension: &str) -> String {
    if extension.is_empty() || extension.starts_with('.') {
        extension.to_string()
    } else {
        format!(".{}", extension)
    }
}

/// Strip a trailing `_<digits>` from a file stem
fn strip_rotation_suffix(stem: &str) -> &str {
    match stem.rfind('_') {
        Some(pos) => {
            let suffix = &stem[pos + 1..];
            if !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) {
                &stem[..pos]
            } else {
                stem
            }
        }
        None => stem,
    }
}

fn current_dir_for(path: &Path) -> Result<PathBuf> {
    env::current_dir()
        .map_err(|e| LoggerError::io_operation("resolving the current directory for", path, e))
}

/// Resolve a logger name or path into an absolute log file path.
///
/// `extension` is applied when `name_or_path` has none. Relative paths are
/// resolved against the current working directory.
///
/// # Examples
///
/// ```
/// use buffered_logger::log_file_path;
///
/// let path = log_file_path("/var/log/service", "md").unwrap();
/// assert_eq!(path, std::path::PathBuf::from("/var/log/service.md"));
/// ```
pub fn log_file_path(name_or_path: impl AsRef<Path>, extension: &str) -> Result<PathBuf> {
    let mut path = name_or_path.as_ref().to_path_buf();

    if path.extension().is_none() {
        let extension = dotted(extension);
        if !extension.is_empty() {
            let mut file_name = path.file_name().unwrap_or_default().to_os_string();
            file_name.push(&extension);
            path.set_file_name(file_name);
        }
    }

    if path.is_relative() {
        path = current_dir_for(&path)?.join(path);
    }

    Ok(path)
}

/// Find the next unused rotation path for `path`.
///
/// For `dir/base.ext` (or `dir/base_N.ext`, whose `_N` is stripped first) the
/// result is the first `dir/base_{i}.ext` with `i` in `1..=max_index` that does
/// not exist. A path without extension gets `default_extension`; a path
/// without directory is placed in the current working directory.
///
/// # Errors
///
/// Returns [`LoggerError::RotationExhausted`] when every candidate up to
/// `max_index` already exists.
pub fn next_available_filename(
    path: impl AsRef<Path>,
    default_extension: &str,
    max_index: usize,
) -> Result<PathBuf> {
    let path = path.as_ref();

    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => current_dir_for(path)?,
    };

    let extension = match path.extension() {
        Some(ext) => format!(".{}", ext.to_string_lossy()),
        None => dotted(default_extension),
    };

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let base = strip_rotation_suffix(&stem);

    for index in 1..=max_index {
        let candidate = directory.join(format!("{}_{}{}", base, index, extension));
        if !candidate.exists() {
            return Ok(candidate);
        }
    }

    Err(LoggerError::rotation_exhausted(path, max_index))
}
