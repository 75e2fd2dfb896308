//! File logging example
//!
//! Demonstrates buffering, size-based rotation and truncate mode.
//!
//! Run with: cargo run --example file_logging

use buffered_logger::prelude::*;

fn main() -> Result<()> {
    println!("=== Buffered Logger - File Logging Example ===\n");

    let options = LoggerOptions::file_only()
        .with_newline_when_missing(true)
        .with_flush_to_log_at(256)
        .with_split_at(1024);

    let logger = Logger::builder("logs/application").options(options).build()?;

    println!("1. Writing 100 entries with a 1 KiB rotation size:");
    for i in 1..=100 {
        logger.info(format_args!("Processing item {}/100", i))?;
        if i % 25 == 0 {
            logger.warn(format_args!("Checkpoint at item {}", i))?;
        }
    }
    logger.close()?;
    println!("   current file: {}", logger.logfile_name());

    println!("\n2. Buffer state:");
    logger.info("buffered, not yet on disk")?;
    println!("   size = {} bytes, capacity = {} bytes", logger.size(), logger.capacity());

    println!("\n3. Options as JSON:");
    println!("{}", logger.options().to_json()?);

    println!("\n4. Switching to truncate mode (destroys the current file):");
    logger.append_mode(false)?;
    logger.info("fresh start")?;
    print!("   {}", logger.str()?);

    println!("\n=== Example completed successfully! ===");
    println!("Check the 'logs/' directory for application.log and its rotated siblings");
    Ok(())
}
