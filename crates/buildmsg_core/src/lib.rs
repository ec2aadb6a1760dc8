//! # buildmsg_core
//!
//! Build session glue for the message cache.
//!
//! This crate provides:
//! - `SessionConfig` loading
//! - `BuildSession`, which attaches a capture listener at the start of a
//!   build, replays cached messages for skipped files and saves the snapshot
//!   when the build finishes
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use buildmsg_core::{BuildSession, SessionConfig};
//! use buildmsg_log::{Logger, TracingSink};
//!
//! let logger = Arc::new(Logger::new());
//! logger.register(Arc::new(TracingSink::new()));
//!
//! let config = SessionConfig::from_file("buildmsg.json")?;
//! let session = BuildSession::start(config, logger);
//!
//! for file in unchanged_files {
//!     session.replay(file);
//! }
//! session.finish()?;
//! ```

mod config;
mod error;
mod session;

pub use config::{SNAPSHOT_FILE_NAME, SessionConfig};
pub use error::SessionError;
pub use session::BuildSession;

pub use buildmsg_cache::{CacheError, MessageStore, PathCanonicalizer};
pub use buildmsg_log::{LogLevel, LogSink, Logger, Message};
