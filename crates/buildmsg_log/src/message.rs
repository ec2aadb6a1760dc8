//! The message value carried through the logging channel.

use serde::{Deserialize, Serialize};

use crate::LogLevel;

/// A single log event emitted by a build step.
///
/// Field names on the wire are `File`, `Line`, `LogLevel`, `Message` and
/// `Phase`, which is also the element shape of a persisted message snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    /// Source file the message is about. `None` for messages that are not
    /// file-scoped.
    #[serde(rename = "File", default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Line or position descriptor. The format is owned by the emitter.
    #[serde(rename = "Line", default, skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,

    /// Severity.
    #[serde(rename = "LogLevel")]
    pub level: LogLevel,

    /// The message body.
    #[serde(rename = "Message")]
    pub text: String,

    /// Build phase that produced the message.
    #[serde(rename = "Phase", default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
}

impl Message {
    /// Creates a message that is not attached to any file.
    pub fn new(level: LogLevel, text: impl Into<String>) -> Self {
        Self {
            file: None,
            line: None,
            level,
            text: text.into(),
            phase: None,
        }
    }

    /// Creates an error message.
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(LogLevel::Error, text)
    }

    /// Creates a warning message.
    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(LogLevel::Warning, text)
    }

    /// Creates an informational message.
    pub fn info(text: impl Into<String>) -> Self {
        Self::new(LogLevel::Info, text)
    }

    /// Sets the file.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Sets the line descriptor.
    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.line = Some(line.into());
        self
    }

    /// Sets the phase.
    pub fn with_phase(mut self, phase: impl Into<String>) -> Self {
        self.phase = Some(phase.into());
        self
    }

    /// Returns the file if it is present and non-empty.
    pub fn file(&self) -> Option<&str> {
        self.file.as_deref().filter(|file| !file.is_empty())
    }
}
