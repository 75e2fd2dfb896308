//! Forwarding sinks
//!
//! A sink is notified with every formatted entry after it was routed to the
//! console destinations. The logger calls it synchronously while holding its
//! lock, so implementations should hand the message off rather than do slow
//! work inline. [`ChannelSink`] does exactly that.

use crossbeam_channel::{bounded, unbounded, Receiver, Sender, TrySendError};
use std::sync::atomic::{AtomicU64, Ordering};

pub trait Sink: Send + Sync {
    fn notify(&self, message: &str);
}

impl<F> Sink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn notify(&self, message: &str) {
        self(message)
    }
}

/// Sink that forwards entries over a channel to a consumer thread
///
/// # Example
///
/// ```
/// use buffered_logger::{ChannelSink, Sink};
///
/// let (sink, receiver) = ChannelSink::bounded(16);
/// sink.notify("info: started");
/// assert_eq!(receiver.recv().unwrap(), "info: started");
/// ```
pub struct ChannelSink {
    sender: Sender<String>,
    dropped: AtomicU64,
}

impl ChannelSink {
    /// Bounded channel; entries are dropped (and counted) when it is full
    pub fn bounded(capacity: usize) -> (Self, Receiver<String>) {
        let (sender, receiver) = bounded(capacity);
        (Self::from_sender(sender), receiver)
    }

    pub fn unbounded() -> (Self, Receiver<String>) {
        let (sender, receiver) = unbounded();
        (Self::from_sender(sender), receiver)
    }

    pub fn from_sender(sender: Sender<String>) -> Self {
        Self {
            sender,
            dropped: AtomicU64::new(0),
        }
    }

    /// Number of entries that could not be handed off
    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl Sink for ChannelSink {
    fn notify(&self, message: &str) {
        match self.sender.try_send(message.to_owned()) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                let dropped = self.dropped.fetch_add(1, Ordering::Relaxed);
                // Alert on first drop and periodically thereafter
                if dropped % 1000 == 0 {
                    eprintln!(
                        "[LOGGER WARNING] Forward channel full, {} entries dropped.",
                        dropped + 1
                    );
                }
            }
            Err(TrySendError::Disconnected(_)) => {
                // Consumer is gone
                self.dropped.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
}
