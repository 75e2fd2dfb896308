//! Output destinations of the logger

pub mod console;
pub mod file;
pub mod rotating_file;

pub use console::{ConsoleRouter, ConsoleWriter, Destination};
pub use file::FileBuffer;
pub use rotating_file::{log_file_path, next_available_filename, DEFAULT_EXTENSION};
