//! Session configuration.

use std::fs;
use std::path::{Path, PathBuf};

use buildmsg_cache::{DEFAULT_CAPTURE_THRESHOLD, PathCanonicalizer};
use buildmsg_log::LogLevel;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::SessionError;

/// File name of the message snapshot inside the cache directory.
pub const SNAPSHOT_FILE_NAME: &str = "messages.json";

/// Configuration for a build session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Directory that absolute file paths are made relative to.
    ///
    /// Defaults to the directory containing the configuration file, or the
    /// working directory when the configuration is not read from disk.
    #[serde(default)]
    pub base_dir: Option<PathBuf>,

    /// Whether to load and save message snapshots.
    #[serde(default = "default_cache")]
    pub cache: bool,

    /// Cache directory, relative to `base_dir` unless absolute.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,

    /// Lowest level that is recorded.
    #[serde(
        default = "default_capture_threshold",
        deserialize_with = "deserialize_level"
    )]
    pub capture_threshold: LogLevel,
}

fn default_cache() -> bool {
    true
}

fn default_cache_dir() -> String {
    ".buildmsg-cache".to_string()
}

fn default_capture_threshold() -> LogLevel {
    DEFAULT_CAPTURE_THRESHOLD
}

/// Accepts level names in any case ("warning", "Warning").
fn deserialize_level<'de, D: Deserializer<'de>>(deserializer: D) -> Result<LogLevel, D::Error> {
    let name = String::deserialize(deserializer)?;
    name.parse().map_err(serde::de::Error::custom)
}

impl SessionConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self {
            base_dir: None,
            cache: true,
            cache_dir: default_cache_dir(),
            capture_threshold: DEFAULT_CAPTURE_THRESHOLD,
        }
    }

    /// Loads configuration from a JSON file.
    ///
    /// A missing `base_dir` becomes the file's directory; a relative one is
    /// resolved against it. A relative `path` is resolved against the working
    /// directory.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| SessionError::config(format!("Failed to read config: {}", e)))?;

        let mut config = Self::from_json(&content)?;

        // A bare file name has an empty parent; anchor it at the working
        // directory first.
        let absolute = std::path::absolute(path)
            .map_err(|e| SessionError::config(format!("Failed to resolve config path: {}", e)))?;
        if let Some(parent) = absolute.parent() {
            config.base_dir = Some(match config.base_dir.take() {
                Some(base) if base.is_relative() => parent.join(base),
                Some(base) => base,
                None => parent.to_path_buf(),
            });
        }

        Ok(config)
    }

    /// Parses configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        serde_json::from_str(json).map_err(|e| SessionError::config(format!("Invalid config: {}", e)))
    }

    /// Returns the base directory as an absolute path.
    pub fn resolved_base_dir(&self) -> Option<PathBuf> {
        let base = match &self.base_dir {
            Some(base) => std::path::absolute(base),
            None => std::env::current_dir(),
        };

        match base {
            Ok(base) => Some(base),
            Err(e) => {
                warn!("Cannot resolve base directory: {}", e);
                None
            }
        }
    }

    /// Builds the path canonicalizer for this session.
    pub fn canonicalizer(&self) -> PathCanonicalizer {
        match self.resolved_base_dir() {
            Some(base) => PathCanonicalizer::new(base),
            None => PathCanonicalizer::without_base(),
        }
    }

    /// Returns the location of the message snapshot.
    pub fn snapshot_path(&self) -> PathBuf {
        let cache_dir = Path::new(&self.cache_dir);
        let dir = match &self.base_dir {
            Some(base) if cache_dir.is_relative() => base.join(cache_dir),
            _ => cache_dir.to_path_buf(),
        };
        dir.join(SNAPSHOT_FILE_NAME)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}
