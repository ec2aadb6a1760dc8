//! The per-file message map.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use tracing::debug;

use crate::listener::CaptureListener;
use crate::path::{PathCanonicalizer, to_forward_slashes};
use crate::{LogLevel, LogSink, Message};

/// Messages below this level are never stored.
pub const DEFAULT_CAPTURE_THRESHOLD: LogLevel = LogLevel::Warning;

/// State shared between a store and its capture listener.
pub(crate) struct StoreState {
    pub(crate) logs: RwLock<HashMap<String, Vec<Message>>>,
    pub(crate) canonicalizer: PathCanonicalizer,
    pub(crate) threshold: LogLevel,
}

impl StoreState {
    /// Appends a copy of `message` under its canonical key.
    ///
    /// Messages without a file are ignored. The stored copy keeps the file as
    /// emitted, with forward slashes.
    pub(crate) fn append(&self, message: &Message) {
        let Some(file) = message.file() else {
            return;
        };

        let key = self.canonicalizer.canonicalize(file);
        let mut stored = message.clone();
        stored.file = Some(to_forward_slashes(file));

        self.logs.write().entry(key).or_default().push(stored);
    }
}

/// Recorded messages for every file of a build, keyed by canonical path.
///
/// Recording is append-only and safe from any number of threads. Messages for
/// one key keep the order in which they were recorded.
pub struct MessageStore {
    pub(crate) state: Arc<StoreState>,
    listener: OnceLock<Arc<CaptureListener>>,
}

impl MessageStore {
    /// Creates an empty store capturing warnings and errors.
    pub fn new(canonicalizer: PathCanonicalizer) -> Self {
        Self::with_threshold(canonicalizer, DEFAULT_CAPTURE_THRESHOLD)
    }

    /// Creates an empty store capturing messages at or above `threshold`.
    pub fn with_threshold(canonicalizer: PathCanonicalizer, threshold: LogLevel) -> Self {
        Self::from_logs(HashMap::new(), canonicalizer, threshold)
    }

    pub(crate) fn from_logs(
        logs: HashMap<String, Vec<Message>>,
        canonicalizer: PathCanonicalizer,
        threshold: LogLevel,
    ) -> Self {
        Self {
            state: Arc::new(StoreState {
                logs: RwLock::new(logs),
                canonicalizer,
                threshold,
            }),
            listener: OnceLock::new(),
        }
    }

    /// Returns the capture threshold.
    pub fn threshold(&self) -> LogLevel {
        self.state.threshold
    }

    /// Returns the canonicalizer used for keys.
    pub fn canonicalizer(&self) -> &PathCanonicalizer {
        &self.state.canonicalizer
    }

    /// Records a message.
    ///
    /// No-op when the message has no file or is below the capture threshold.
    pub fn record(&self, message: &Message) {
        if message.level < self.state.threshold {
            return;
        }
        self.state.append(message);
    }

    /// Returns the messages recorded for `file`, in recording order.
    ///
    /// `file` may be given in any notation that canonicalizes to the key.
    pub fn get(&self, file: &str) -> Vec<Message> {
        let key = self.state.canonicalizer.canonicalize(file);
        self.state
            .logs
            .read()
            .get(&key)
            .cloned()
            .unwrap_or_default()
    }

    /// Re-emits the messages recorded for `file` into `sink`, in order.
    ///
    /// Nothing is removed, so replaying twice emits everything twice. Returns
    /// the number of messages emitted.
    pub fn replay(&self, file: &str, sink: &dyn LogSink) -> usize {
        let messages = self.get(file);
        for message in &messages {
            sink.write(message);
        }
        debug!("Replayed {} messages for {}", messages.len(), file);
        messages.len()
    }

    /// Returns the listener that records into this store.
    ///
    /// The listener is created on first call; later calls return the same
    /// instance.
    pub fn listener(&self) -> Arc<CaptureListener> {
        let listener = self
            .listener
            .get_or_init(|| Arc::new(CaptureListener::new(Arc::clone(&self.state))));
        Arc::clone(listener)
    }

    /// Returns all keys, sorted.
    pub fn files(&self) -> Vec<String> {
        let mut files: Vec<String> = self.state.logs.read().keys().cloned().collect();
        files.sort();
        files
    }

    /// Returns the number of files with recorded messages.
    pub fn len(&self) -> usize {
        self.state.logs.read().len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.state.logs.read().is_empty()
    }

    /// Returns the total number of recorded messages.
    pub fn message_count(&self) -> usize {
        self.state.logs.read().values().map(Vec::len).sum()
    }
}

impl Default for MessageStore {
    fn default() -> Self {
        Self::new(PathCanonicalizer::default())
    }
}

impl std::fmt::Debug for MessageStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageStore")
            .field("files", &self.len())
            .field("threshold", &self.state.threshold)
            .field("base_dir", &self.state.canonicalizer.base_dir())
            .finish()
    }
}
