//! One build, from listener attachment to snapshot save.

use std::io::ErrorKind;
use std::sync::Arc;

use buildmsg_cache::{CacheError, MessageStore};
use buildmsg_log::{LogSink, Logger, Message};
use tracing::{debug, info, warn};

use crate::{SessionConfig, SessionError};

/// A running build session.
///
/// Starting a session loads the previous build's snapshot and attaches a
/// fresh store's capture listener to the logger. Messages replayed for
/// skipped files flow through the logger as well, so they are captured again
/// and carried into the next snapshot.
pub struct BuildSession {
    config: SessionConfig,
    logger: Arc<Logger>,
    previous: Option<MessageStore>,
    current: MessageStore,
    listener: Arc<dyn LogSink>,
}

impl BuildSession {
    /// Starts a session.
    ///
    /// A missing or unreadable snapshot means a cold start: nothing can be
    /// replayed, every file has to be rebuilt.
    pub fn start(config: SessionConfig, logger: Arc<Logger>) -> Self {
        let canonicalizer = config.canonicalizer();
        let previous = if config.cache {
            load_previous(&config, canonicalizer.clone())
        } else {
            None
        };

        let current = MessageStore::with_threshold(canonicalizer, config.capture_threshold);
        let listener: Arc<dyn LogSink> = current.listener();
        logger.register(Arc::clone(&listener));

        Self {
            config,
            logger,
            previous,
            current,
            listener,
        }
    }

    /// Returns the session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Returns the logger build steps should write to.
    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    /// Returns the store recording this build.
    pub fn current(&self) -> &MessageStore {
        &self.current
    }

    /// Returns the store loaded from the previous build, if any.
    pub fn previous(&self) -> Option<&MessageStore> {
        self.previous.as_ref()
    }

    /// Returns the previous build's messages for `file`.
    pub fn previous_messages(&self, file: &str) -> Vec<Message> {
        self.previous
            .as_ref()
            .map(|store| store.get(file))
            .unwrap_or_default()
    }

    /// Replays the previous build's messages for a skipped file into the
    /// logger. Returns the number of messages emitted.
    pub fn replay(&self, file: &str) -> usize {
        match &self.previous {
            Some(store) => store.replay(file, self.logger.as_ref()),
            None => 0,
        }
    }

    /// Detaches the listener, flushes the logger and saves the snapshot.
    ///
    /// Returns the store recorded during this session.
    pub fn finish(mut self) -> Result<MessageStore, SessionError> {
        self.detach();
        self.logger.flush();

        let current = std::mem::take(&mut self.current);
        if self.config.cache {
            current.save_to_path(self.config.snapshot_path())?;
        }

        info!(
            "Build session finished with {} messages in {} files",
            current.message_count(),
            current.len()
        );
        Ok(current)
    }

    fn detach(&self) {
        if self.logger.unregister(&self.listener) {
            debug!("Detached message capture listener");
        }
    }
}

impl Drop for BuildSession {
    fn drop(&mut self) {
        self.detach();
    }
}

impl std::fmt::Debug for BuildSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildSession")
            .field("config", &self.config)
            .field("previous", &self.previous)
            .field("current", &self.current)
            .finish()
    }
}

fn load_previous(
    config: &SessionConfig,
    canonicalizer: buildmsg_cache::PathCanonicalizer,
) -> Option<MessageStore> {
    let path = config.snapshot_path();
    match MessageStore::load_from_path(&path, canonicalizer) {
        Ok(store) => {
            info!(
                "Loaded previous messages for {} files from {}",
                store.len(),
                path.display()
            );
            Some(store)
        }
        Err(CacheError::Io(e)) if e.kind() == ErrorKind::NotFound => {
            debug!("No message snapshot found at {}", path.display());
            None
        }
        Err(e) => {
            warn!("Ignoring message snapshot {}: {}", path.display(), e);
            None
        }
    }
}
