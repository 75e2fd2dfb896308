//! Basic logger usage example
//!
//! Demonstrates level routing: warnings and below go to stdout, errors to
//! stderr, and everything lands in `basic_usage.log`.
//!
//! Run with: cargo run --example basic_usage

use buffered_logger::prelude::*;
use buffered_logger::{info, warn};

fn main() -> Result<()> {
    println!("=== Buffered Logger - Basic Usage Example ===\n");

    let logger = Logger::builder("basic_usage")
        .options(LoggerOptions::new().with_newline_when_missing(true))
        .build()?;

    println!("1. Logging at different levels:");
    logger.log("A message without level")?;
    logger.info("This is an info message")?;
    logger.warn("This is a warning message")?;
    logger.error("This is an error message (stderr)")?;
    logger.exception("This is an exception message (stderr)")?;

    println!("\n2. Formatting with macros and streams:");
    let port = 8080;
    info!(logger, "Server listening on port {}", port)?;
    warn!(logger, "{} of {} workers busy", 7, 8)?;
    logger
        .stream(LogLevel::Info)
        .push("uptime ")
        .push(3.25)
        .push("s")
        .finish()?;

    println!("\n3. Pausing stdout:");
    logger.pause_stdout();
    logger.info("Only in the log file")?;
    logger.enable_stdout();

    println!("\n4. Log file content:");
    print!("{}", logger.str()?);
    println!("\n   written to {}", logger.logfile_path().display());

    logger.remove_log_file()?;
    println!("\n=== Example completed successfully! ===");
    Ok(())
}
