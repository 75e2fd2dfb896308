//! Forwarding example
//!
//! Hands every formatted entry to a consumer thread through a channel while
//! still writing the log file.
//!
//! Run with: cargo run --example forwarding

use buffered_logger::prelude::*;
use std::sync::Arc;
use std::thread;

fn main() -> Result<()> {
    println!("=== Buffered Logger - Forwarding Example ===\n");

    let (sink, receiver) = ChannelSink::bounded(1024);
    let logger = Arc::new(
        Logger::builder("forwarding")
            .options(LoggerOptions::file_only().with_newline_when_missing(true))
            .forward_to(sink)
            .build()?,
    );

    let consumer = thread::spawn(move || {
        let mut errors = 0;
        for entry in receiver.iter() {
            if entry.starts_with("error: ") {
                errors += 1;
            }
            print!("   forwarded: {}", entry);
        }
        errors
    });

    let workers: Vec<_> = (0..3)
        .map(|id| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || -> Result<()> {
                logger.info(format_args!("worker {} started", id))?;
                if id == 1 {
                    logger.error(format_args!("worker {} failed", id))?;
                }
                Ok(())
            })
        })
        .collect();

    for worker in workers {
        if let Ok(Err(e)) = worker.join() {
            eprintln!("worker error: {}", e);
        }
    }

    // Replacing the sink drops the channel sender and ends the consumer
    logger.set_forward(None);
    let errors = consumer.join().unwrap_or_default();
    println!("\n   {} error entries forwarded", errors);

    logger.remove_log_file()?;
    println!("\n=== Example completed successfully! ===");
    Ok(())
}
