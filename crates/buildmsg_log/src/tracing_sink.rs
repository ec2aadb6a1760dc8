//! Sink that presents messages live through `tracing`.

use tracing::{debug, error, info, trace, warn};

use crate::{LogLevel, LogSink, Message};

/// Forwards every message to the active `tracing` subscriber.
///
/// Levels map as Error→`error`, Warning→`warn`, Suggestion and Info→`info`,
/// Verbose→`debug` and Diagnostic→`trace`. File, line and phase are attached
/// as structured fields.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TracingSink {
    /// Creates a tracing sink.
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for TracingSink {
    fn write(&self, message: &Message) {
        let file = message.file.as_deref();
        let line = message.line.as_deref();
        let phase = message.phase.as_deref();
        let text = &message.text;

        match message.level {
            LogLevel::Error => error!(target: "buildmsg", file, line, phase, "{text}"),
            LogLevel::Warning => warn!(target: "buildmsg", file, line, phase, "{text}"),
            LogLevel::Suggestion | LogLevel::Info => {
                info!(target: "buildmsg", file, line, phase, "{text}")
            }
            LogLevel::Verbose => debug!(target: "buildmsg", file, line, phase, "{text}"),
            LogLevel::Diagnostic => trace!(target: "buildmsg", file, line, phase, "{text}"),
        }
    }
}
