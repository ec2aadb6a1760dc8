//! In-memory sink for reporters and tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::{LogLevel, LogSink, Message};

/// Collects every message it receives.
///
/// The error count is tracked atomically so exit-code checks do not need to
/// lock the message list.
#[derive(Debug, Default)]
pub struct MemorySink {
    messages: Mutex<Vec<Message>>,
    error_count: AtomicUsize,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all collected messages in arrival order.
    pub fn messages(&self) -> Vec<Message> {
        self.messages.lock().clone()
    }

    /// Takes all collected messages, leaving the sink empty.
    ///
    /// The error count is not reset.
    pub fn take_all(&self) -> Vec<Message> {
        std::mem::take(&mut *self.messages.lock())
    }

    /// Returns the number of collected messages.
    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    /// Returns true if no messages are held.
    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }

    /// Returns the number of error messages seen so far.
    pub fn error_count(&self) -> usize {
        self.error_count.load(Ordering::Relaxed)
    }

    /// Returns true if any error message was seen.
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}

impl LogSink for MemorySink {
    fn write(&self, message: &Message) {
        if message.level == LogLevel::Error {
            self.error_count.fetch_add(1, Ordering::Relaxed);
        }
        self.messages.lock().push(message.clone());
    }
}
