//! Sink capability and the dispatcher that fans messages out to sinks.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::Message;

/// A subscriber on the logging channel.
///
/// Implementations must tolerate concurrent calls: build steps log from many
/// worker threads at once.
pub trait LogSink: Send + Sync {
    /// Receives one message.
    fn write(&self, message: &Message);

    /// Flushes buffered output, if any.
    fn flush(&self) {}
}

/// Dispatches messages to every registered [`LogSink`].
///
/// A `Logger` is passed explicitly to whatever produces diagnostics. Sinks can
/// be attached and detached while the logger is shared between threads.
#[derive(Default)]
pub struct Logger {
    listeners: RwLock<Vec<Arc<dyn LogSink>>>,
}

impl Logger {
    /// Creates a logger with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a listener. Registering the same listener twice delivers each
    /// message to it twice.
    pub fn register(&self, listener: Arc<dyn LogSink>) {
        self.listeners.write().push(listener);
    }

    /// Detaches a previously registered listener.
    ///
    /// Returns `false` if the listener was not attached.
    pub fn unregister(&self, listener: &Arc<dyn LogSink>) -> bool {
        let mut listeners = self.listeners.write();
        match listeners.iter().position(|l| Arc::ptr_eq(l, listener)) {
            Some(index) => {
                listeners.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns the number of attached listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    /// Delivers a message to every listener in registration order.
    pub fn log(&self, message: &Message) {
        // Listeners may log or register from inside `write`, so the lock is
        // released before dispatch.
        let listeners = self.listeners.read().clone();
        for listener in &listeners {
            listener.write(message);
        }
    }

    /// Flushes every listener.
    pub fn flush(&self) {
        let listeners = self.listeners.read().clone();
        for listener in &listeners {
            listener.flush();
        }
    }
}

impl LogSink for Logger {
    fn write(&self, message: &Message) {
        self.log(message);
    }

    fn flush(&self) {
        Logger::flush(self);
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
