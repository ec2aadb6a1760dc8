//! Message severity levels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Severity of a log message, ordered from least to most severe.
///
/// The derived `Ord` follows declaration order, so threshold checks are plain
/// comparisons: `level >= LogLevel::Warning`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    /// Internal tracing output.
    Diagnostic,
    /// Detailed progress output.
    Verbose,
    /// Informational message.
    Info,
    /// Optional improvement.
    Suggestion,
    /// Something should be reviewed.
    Warning,
    /// Something is broken.
    Error,
}

impl LogLevel {
    /// All levels in ascending order.
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Diagnostic,
        LogLevel::Verbose,
        LogLevel::Info,
        LogLevel::Suggestion,
        LogLevel::Warning,
        LogLevel::Error,
    ];

    /// Returns the lowercase name of the level.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Diagnostic => "diagnostic",
            LogLevel::Verbose => "verbose",
            LogLevel::Info => "info",
            LogLevel::Suggestion => "suggestion",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a [`LogLevel`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown log level: {0}")]
pub struct ParseLevelError(pub String);

impl FromStr for LogLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseLevelError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_ordering() {
        assert!(LogLevel::Diagnostic < LogLevel::Verbose);
        assert!(LogLevel::Verbose < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Suggestion);
        assert!(LogLevel::Suggestion < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Error);
    }

    #[rstest]
    #[case("warning", LogLevel::Warning)]
    #[case("Warning", LogLevel::Warning)]
    #[case(" ERROR ", LogLevel::Error)]
    #[case("diagnostic", LogLevel::Diagnostic)]
    fn test_parse(#[case] input: &str, #[case] expected: LogLevel) {
        assert_eq!(input.parse::<LogLevel>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "fatal".parse::<LogLevel>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown log level: fatal");
    }

    #[test]
    fn test_display_roundtrips_through_parse() {
        for level in LogLevel::ALL {
            assert_eq!(level.to_string().parse::<LogLevel>().unwrap(), level);
        }
    }

    #[test]
    fn test_serializes_as_variant_name() {
        let json = serde_json::to_string(&LogLevel::Suggestion).unwrap();
        assert_eq!(json, "\"Suggestion\"");
    }
}
