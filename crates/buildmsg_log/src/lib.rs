//! # buildmsg_log
//!
//! Log messages and the sink capability they are dispatched through.
//!
//! Build steps emit [`Message`]s into a [`Logger`], which fans each one out to
//! every registered [`LogSink`]. The logger is an explicit value handed to the
//! components that log, so any number of independent build sessions can run
//! side by side in one process.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use buildmsg_log::{LogLevel, Logger, MemorySink, Message};
//!
//! let logger = Logger::new();
//! let memory = Arc::new(MemorySink::new());
//! logger.register(memory.clone());
//!
//! logger.log(&Message::warning("missing link").with_file("docs/a.md"));
//! assert_eq!(memory.messages()[0].level, LogLevel::Warning);
//! ```

mod level;
mod logger;
mod memory;
mod message;
mod tracing_sink;

pub use level::{LogLevel, ParseLevelError};
pub use logger::{LogSink, Logger};
pub use memory::MemorySink;
pub use message::Message;
pub use tracing_sink::TracingSink;
