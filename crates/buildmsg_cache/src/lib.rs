//! # buildmsg_cache
//!
//! Per-file diagnostic message cache for incremental builds.
//!
//! While a build runs, a [`CaptureListener`] attached to the [`Logger`]
//! records every warning and error that names a file into a [`MessageStore`],
//! keyed by the file's canonical path. The store is saved at the end of the
//! build. On the next incremental build it is loaded again, and for every file
//! whose build step is skipped the stored messages are replayed into the
//! logger, so reporters see the same output as a full rebuild.
//!
//! ## Canonical keys
//!
//! Keys use forward slashes. Absolute paths under the session's base
//! directory are rewritten relative to it; everything else is kept as-is.
//! See [`PathCanonicalizer`].
//!
//! ## Storage
//!
//! Snapshots are JSON objects mapping each key to its ordered message list.
//!
//! [`Logger`]: buildmsg_log::Logger

mod error;
mod listener;
mod path;
mod persist;
mod store;

pub use error::CacheError;
pub use listener::CaptureListener;
pub use path::{PathCanonicalizer, is_relative};
pub use store::{DEFAULT_CAPTURE_THRESHOLD, MessageStore};

pub use buildmsg_log::{LogLevel, LogSink, Message};
