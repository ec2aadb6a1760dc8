//! Saving and loading message snapshots.

use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{CacheError, LogLevel, Message, MessageStore, PathCanonicalizer};

fn encode_error(e: serde_json::Error) -> CacheError {
    if e.is_io() {
        CacheError::Io(e.into())
    } else {
        CacheError::serialization(e.to_string())
    }
}

fn decode_error(e: serde_json::Error) -> CacheError {
    if e.is_io() {
        CacheError::Io(e.into())
    } else {
        CacheError::deserialization(e.to_string())
    }
}

impl MessageStore {
    /// Writes every key and its messages as a JSON object.
    ///
    /// Keys are written in sorted order, so equal stores produce equal bytes.
    pub fn save<W: Write>(&self, writer: W) -> Result<(), CacheError> {
        let logs = self.state.logs.read();
        let sorted: BTreeMap<&String, &Vec<Message>> = logs.iter().collect();
        serde_json::to_writer(writer, &sorted).map_err(encode_error)
    }

    /// Like [`save`](Self::save), with indentation.
    pub fn save_pretty<W: Write>(&self, writer: W) -> Result<(), CacheError> {
        let logs = self.state.logs.read();
        let sorted: BTreeMap<&String, &Vec<Message>> = logs.iter().collect();
        serde_json::to_writer_pretty(writer, &sorted).map_err(encode_error)
    }

    /// Reads a snapshot written by [`save`](Self::save) into a new store.
    ///
    /// Malformed input fails the whole load; a partially read snapshot is never
    /// returned. A `null` document is rejected as an invalid argument.
    pub fn load<R: Read>(reader: R, canonicalizer: PathCanonicalizer) -> Result<Self, CacheError> {
        Self::load_with_threshold(reader, canonicalizer, crate::DEFAULT_CAPTURE_THRESHOLD)
    }

    /// Like [`load`](Self::load), recording further messages at or above
    /// `threshold`.
    pub fn load_with_threshold<R: Read>(
        reader: R,
        canonicalizer: PathCanonicalizer,
        threshold: LogLevel,
    ) -> Result<Self, CacheError> {
        let logs: Option<HashMap<String, Vec<Message>>> =
            serde_json::from_reader(reader).map_err(decode_error)?;
        let logs = logs.ok_or_else(|| CacheError::invalid_argument("snapshot payload is null"))?;

        Ok(Self::from_logs(logs, canonicalizer, threshold))
    }

    /// Saves to `path`, replacing any existing file atomically.
    ///
    /// The snapshot is written to a sibling temporary file which is then
    /// renamed over `path`. Parent directories are created as needed.
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<(), CacheError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp = temp_path(path);
        let written = File::create(&tmp)
            .map_err(CacheError::from)
            .and_then(|file| {
                let mut writer = BufWriter::new(file);
                self.save(&mut writer)?;
                writer.flush()?;
                Ok(())
            })
            .and_then(|()| fs::rename(&tmp, path).map_err(CacheError::from));

        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }

        info!(
            "Saved messages for {} files to {}",
            self.len(),
            path.display()
        );
        Ok(())
    }

    /// Loads a snapshot file.
    pub fn load_from_path(
        path: impl AsRef<Path>,
        canonicalizer: PathCanonicalizer,
    ) -> Result<Self, CacheError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let store = Self::load(BufReader::new(file), canonicalizer)?;

        debug!(
            "Loaded messages for {} files from {}",
            store.len(),
            path.display()
        );
        Ok(store)
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
