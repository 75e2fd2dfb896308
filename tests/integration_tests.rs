//! Integration tests for the buffered logger
//!
//! These tests verify:
//! - Round trip through the log file
//! - Level routing to stdout, stderr and stdlog
//! - Buffer threshold flushing and size-based rotation
//! - Append and truncate modes
//! - Idempotent close and lock-free equivalence
//! - Direct console writes, forwarding and streaming

use buffered_logger::prelude::*;
use buffered_logger::{error, info, log_file_path, next_available_filename, DEFAULT_EXTENSION};
use parking_lot::Mutex;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().clone()).expect("captured output is UTF-8")
    }
}

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct BrokenPipe;

impl io::Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct Consoles {
    out: Capture,
    err: Capture,
    log: Capture,
}

fn logger_with_consoles(path: &Path, options: LoggerOptions) -> (Logger, Consoles) {
    let consoles = Consoles {
        out: Capture::default(),
        err: Capture::default(),
        log: Capture::default(),
    };
    let logger = Logger::builder(path)
        .options(options)
        .stdout_writer(consoles.out.clone())
        .stderr_writer(consoles.err.clone())
        .stdlog_writer(consoles.log.clone())
        .build()
        .expect("Failed to build logger");
    (logger, consoles)
}

fn file_logger(path: &Path, options: LoggerOptions) -> Logger {
    Logger::builder(path)
        .options(options)
        .build()
        .expect("Failed to build logger")
}

#[test]
fn test_round_trip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = file_logger(&temp_dir.path().join("round_trip"), LoggerOptions::file_only());

    logger.print(LogLevel::None, "Hello World").unwrap();
    assert_eq!(logger.str().unwrap(), "Hello World");
    assert_eq!(logger.to_string().unwrap(), "Hello World");
}

#[test]
fn test_close_is_idempotent() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("idempotent.log");
    let logger = file_logger(&path, LoggerOptions::file_only());

    logger.log("once").unwrap();
    logger.close().unwrap();
    logger.close().unwrap();
    logger.close().unwrap();

    assert!(!logger.is_open());
    assert_eq!(fs::read_to_string(&path).unwrap(), "once");
}

#[test]
fn test_level_routing() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let options = LoggerOptions::new()
        .with_std_outputs(true, true, true)
        .with_newline_when_missing(true);
    let (logger, consoles) = logger_with_consoles(&temp_dir.path().join("routing"), options);

    logger.log("plain").unwrap();
    logger.info("i").unwrap();
    logger.warn("w").unwrap();
    logger.error("e").unwrap();
    logger.exception("x").unwrap();

    assert_eq!(consoles.out.text(), "plain\ninfo: i\nwarn: w\n");
    assert_eq!(consoles.err.text(), "error: e\nexception: x\n");
    assert_eq!(
        consoles.log.text(),
        "plain\ninfo: i\nwarn: w\nerror: e\nexception: x\n"
    );
    assert_eq!(
        logger.str().unwrap(),
        "plain\ninfo: i\nwarn: w\nerror: e\nexception: x\n"
    );
}

#[test]
fn test_paused_destinations_are_silent() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (logger, consoles) =
        logger_with_consoles(&temp_dir.path().join("paused"), LoggerOptions::new());

    logger.pause_stdout();
    logger.pause_stderr();
    logger.info("quiet").unwrap();
    logger.error("quiet").unwrap();
    assert_eq!(consoles.out.text(), "");
    assert_eq!(consoles.err.text(), "");

    logger.enable_stdout();
    logger.info("loud").unwrap();
    assert_eq!(consoles.out.text(), "info: loud");

    logger.enable_stdlog();
    logger.warn("logged").unwrap();
    assert_eq!(consoles.log.text(), "warn: logged");
    logger.pause_stdlog();
    logger.warn("not logged").unwrap();
    assert_eq!(consoles.log.text(), "warn: logged");
}

#[test]
fn test_threshold_flush() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("threshold.log");
    let options = LoggerOptions::file_only()
        .without_split()
        .with_flush_to_log_at(10);
    let logger = file_logger(&path, options);

    logger.log("12345").unwrap();
    logger.log("67890").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "");
    assert_eq!(logger.size(), 10);

    // The buffer reached the threshold, so this write flushes it first
    logger.log("abc").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "1234567890");
    assert_eq!(logger.size(), 3);

    logger.close().unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "1234567890abc");
}

#[test]
fn test_rotation() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("rotating.log");
    let options = LoggerOptions::file_only()
        .with_split_at(30)
        .with_newline_when_missing(true);
    let logger = file_logger(&path, options);

    for i in 0..9 {
        logger.log(format_args!("entry number {}", i)).unwrap();
    }
    logger.close().unwrap();

    let first = fs::read_to_string(&path).unwrap();
    let second = fs::read_to_string(temp_dir.path().join("rotating_1.log")).unwrap();
    assert!(first.len() < 30);
    assert!(second.len() < 30);
    assert_eq!(first, "entry number 0\n");
    assert_eq!(second, "entry number 1\n");

    // Nothing was lost and every file starts with a whole entry
    let mut combined = String::new();
    combined.push_str(&first);
    for i in 1..9 {
        let rotated = temp_dir.path().join(format!("rotating_{}.log", i));
        combined.push_str(&fs::read_to_string(rotated).unwrap());
    }
    let expected: String = (0..9).map(|i| format!("entry number {}\n", i)).collect();
    assert_eq!(combined, expected);

    assert_eq!(logger.logfile_name(), "rotating_8.log");
}

#[test]
fn test_rotation_exhaustion_is_reported() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("small.log");
    let options = LoggerOptions::file_only()
        .with_split_at(4)
        .with_max_rotation_index(2);
    let logger = file_logger(&path, options);

    logger.log("aaa").unwrap();
    logger.log("bbb").unwrap();
    logger.log("ccc").unwrap();
    let err = logger.log("ddd").unwrap_err();
    assert!(matches!(err, LoggerError::RotationExhausted { max_index: 2, .. }));
}

#[test]
fn test_filename_scheme() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("test_log.txt");
    fs::write(&path, "").unwrap();
    fs::write(temp_dir.path().join("test_log_1.txt"), "").unwrap();

    let next = next_available_filename(&path, DEFAULT_EXTENSION, 100).unwrap();
    assert_eq!(next, temp_dir.path().join("test_log_2.txt"));

    let resolved = log_file_path(temp_dir.path().join("test_log"), "txt").unwrap();
    assert_eq!(resolved, temp_dir.path().join("test_log.txt"));
}

#[test]
fn test_append_mode_keeps_content() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("append.log");
    fs::write(&path, "existing ").unwrap();

    let logger = file_logger(&path, LoggerOptions::file_only());
    logger.log("added").unwrap();
    assert_eq!(logger.str().unwrap(), "existing added");
}

#[test]
fn test_truncate_mode_is_destructive() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("truncate.log");

    let logger = file_logger(&path, LoggerOptions::file_only());
    logger.log("first session").unwrap();
    logger.close().unwrap();

    logger.append_mode(false).unwrap();
    logger.log("second").unwrap();
    assert_eq!(logger.str().unwrap(), "second");

    let fresh = file_logger(&path, LoggerOptions::file_only().with_append(false));
    fresh.log("third").unwrap();
    assert_eq!(fresh.str().unwrap(), "third");
}

#[test]
fn test_lock_free_equivalence() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let run = |name: &str, lock_free: bool| {
        let options = LoggerOptions::file_only()
            .with_lock_free(lock_free)
            .with_split_at(40)
            .with_flush_to_log_at(16)
            .with_newline_when_missing(true);
        let logger = file_logger(&temp_dir.path().join(name), options);
        for i in 0..20 {
            logger.print(LogLevel::ALL[i % 5], format_args!("message {}", i)).unwrap();
        }
        logger.close().unwrap();

        let mut contents = Vec::new();
        contents.push(fs::read_to_string(temp_dir.path().join(format!("{}.log", name))).unwrap());
        for i in 1.. {
            let rotated = temp_dir.path().join(format!("{}_{}.log", name, i));
            if !rotated.exists() {
                break;
            }
            contents.push(fs::read_to_string(rotated).unwrap());
        }
        contents
    };

    let locked = run("locked", false);
    let lock_free = run("lock_free", true);
    assert!(locked.len() > 1);
    assert_eq!(locked, lock_free);
}

#[test]
fn test_direct_console_writes() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let options = LoggerOptions::new()
        .with_std_outputs(true, true, true)
        .with_immediate_mode(false);
    let (logger, consoles) = logger_with_consoles(&temp_dir.path().join("direct"), options);

    logger.cout("to stdout").unwrap();
    logger.cerr("to stderr").unwrap();
    logger.clog("to stdlog").unwrap();

    assert_eq!(consoles.out.text(), "to stdout");
    assert_eq!(consoles.err.text(), "to stderr");
    assert_eq!(consoles.log.text(), "to stdlog");
    assert!(logger.is_empty());

    logger.update_options(|o| o.log_from_stdout = true).unwrap();
    logger.cout(" again").unwrap();
    assert_eq!(logger.str().unwrap(), " again");

    logger.pause_stderr();
    logger.cerr("dropped").unwrap();
    assert_eq!(consoles.err.text(), "to stderr");
}

#[test]
fn test_forwarding() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink_seen = Arc::clone(&seen);

    let logger = Logger::builder(temp_dir.path().join("forward"))
        .options(LoggerOptions::file_only())
        .forward_to(move |entry: &str| sink_seen.lock().push(entry.to_string()))
        .build()
        .unwrap();

    logger.info("one").unwrap();
    logger.error("two").unwrap();
    assert_eq!(*seen.lock(), vec!["info: one".to_string(), "error: two".to_string()]);

    let (sink, receiver) = ChannelSink::unbounded();
    logger.set_forward(Some(Arc::new(sink)));
    logger.warn("three").unwrap();
    assert_eq!(receiver.try_recv().unwrap(), "warn: three");

    logger.set_forward(None);
    logger.warn("four").unwrap();
    assert!(receiver.try_recv().is_err());
    assert_eq!(seen.lock().len(), 2);
}

#[test]
fn test_stream_and_macros() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = file_logger(
        &temp_dir.path().join("stream"),
        LoggerOptions::file_only().with_newline_when_missing(true),
    );

    logger
        .stream(LogLevel::Warn)
        .push("queue depth ")
        .push(12)
        .push(", limit ")
        .push(10)
        .finish()
        .unwrap();
    info!(logger, "{} workers", 4).unwrap();
    error!(logger, "worker {} failed", 2).unwrap();

    assert_eq!(
        logger.str().unwrap(),
        "warn: queue depth 12, limit 10\ninfo: 4 workers\nerror: worker 2 failed\n"
    );
}

#[test]
fn test_clear_and_remove() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("remove.log");
    let logger = file_logger(&path, LoggerOptions::file_only());

    logger.log("discarded").unwrap();
    logger.clear();
    logger.log("kept").unwrap();
    assert_eq!(logger.str().unwrap(), "kept");

    logger.log("pending").unwrap();
    logger.remove_log_file().unwrap();
    assert!(!path.exists());
    assert!(logger.is_empty());

    // Removing a missing file is not an error
    logger.remove_log_file().unwrap();

    logger.reset();
    logger.log("fresh").unwrap();
    assert_eq!(logger.str().unwrap(), "fresh");
}

#[test]
fn test_options_from_json() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let options = LoggerOptions::from_json(
        r#"{ "enable_stdout": false, "enable_stderr": false, "append_newline_when_missing": true }"#,
    )
    .unwrap();

    let logger = file_logger(&temp_dir.path().join("json"), options);
    logger.info("configured").unwrap();
    assert_eq!(logger.str().unwrap(), "info: configured\n");
    assert!(!logger.options().enable_stdout);
}

#[test]
fn test_shared_between_threads() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = Arc::new(file_logger(
        &temp_dir.path().join("threads"),
        LoggerOptions::file_only().with_newline_when_missing(true),
    ));

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let logger = Arc::clone(&logger);
            std::thread::spawn(move || {
                for i in 0..25 {
                    logger.info(format_args!("thread {} entry {}", t, i)).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let contents = logger.str().unwrap();
    assert_eq!(contents.lines().count(), 100);
    assert!(contents.lines().all(|line| line.starts_with("info: thread ")));
}

#[test]
fn test_broken_stdout_keeps_file_logging() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("broken_stdout.log");
    let logger = Logger::builder(&path)
        .options(LoggerOptions::new().with_newline_when_missing(true))
        .stdout_writer(BrokenPipe)
        .build()
        .expect("Failed to build logger");

    for i in 0..1000 {
        let err = logger.info(format_args!("entry {}", i)).unwrap_err();
        assert!(err.to_string().contains("<stdout>"));
    }
    assert!(logger.size() > 0);

    // Close reaches the file even though stdout keeps failing
    logger.close().expect("Failed to close");
    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 1000);
    assert!(contents.starts_with("info: entry 0\n"));
    assert!(contents.ends_with("info: entry 999\n"));
}

#[test]
fn test_drop_flushes_file_despite_console_failure() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("teardown.log");
    {
        let logger = Logger::builder(&path)
            .options(
                LoggerOptions::new()
                    .with_immediate_mode(false)
                    .with_newline_when_missing(true),
            )
            .stdout_writer(BrokenPipe)
            .build()
            .expect("Failed to build logger");

        // Buffered on stdout, so the failure only surfaces during teardown
        logger.info("last words").unwrap();
    }
    assert_eq!(fs::read_to_string(&path).unwrap(), "info: last words\n");
}

#[test]
fn test_replace_console_writer() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let options = LoggerOptions::new().with_immediate_mode(false);
    let (logger, consoles) = logger_with_consoles(&temp_dir.path().join("swap"), options);

    logger.info("before ").unwrap();
    let replacement = Capture::default();
    logger
        .set_console_writer(Destination::Stdout, Box::new(replacement.clone()))
        .unwrap();
    logger.info("after").unwrap();
    logger.close().unwrap();

    // Pending bytes went to the old writer before the swap
    assert_eq!(consoles.out.text(), "info: before ");
    assert_eq!(replacement.text(), "info: after");
}
