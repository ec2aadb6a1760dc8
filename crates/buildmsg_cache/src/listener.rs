//! Logger adapter that feeds a [`MessageStore`](crate::MessageStore).

use std::sync::Arc;

use crate::store::StoreState;
use crate::{LogLevel, LogSink, Message};

/// A [`LogSink`] that records qualifying messages into the store it was
/// obtained from.
///
/// Messages below the store's capture threshold, and messages without a file,
/// are dropped. The listener never writes to any other channel; presenting
/// messages live is left to the logger's other sinks.
///
/// Obtain one with [`MessageStore::listener`](crate::MessageStore::listener).
pub struct CaptureListener {
    state: Arc<StoreState>,
}

impl CaptureListener {
    pub(crate) fn new(state: Arc<StoreState>) -> Self {
        Self { state }
    }

    /// Returns the minimum level this listener records.
    pub fn threshold(&self) -> LogLevel {
        self.state.threshold
    }
}

impl LogSink for CaptureListener {
    fn write(&self, message: &Message) {
        if message.level >= self.state.threshold {
            self.state.append(message);
        }
    }
}

impl std::fmt::Debug for CaptureListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureListener")
            .field("threshold", &self.state.threshold)
            .finish()
    }
}
