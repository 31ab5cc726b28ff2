//! High-score persistence.
//!
//! A small JSON key-value file standing in for the browser's local storage:
//! string keys to non-negative integers. Only the high-score key is used, but
//! the store itself is plain `get`/`set`.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use log::warn;
use thiserror::Error;

/// Key the best-ever final score is stored under.
pub const HIGH_SCORE_KEY: &str = "highScore";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("failed to write {path}: {source}")]
    Write { path: String, source: io::Error },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// File-backed key-value store for persisted scores.
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read a value. A missing file or missing key is `None`, not an error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when the file exists but cannot be read or parsed.
    pub fn get(&self, key: &str) -> Result<Option<u32>, StoreError> {
        Ok(self.read_all()?.get(key).copied())
    }

    /// Write a value, creating the file if needed and keeping other keys.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when the file cannot be written. A corrupt
    /// existing file is replaced rather than treated as fatal.
    pub fn set(&self, key: &str, value: u32) -> Result<(), StoreError> {
        let mut entries = self.read_all().unwrap_or_else(|err| {
            warn!("replacing unreadable score file: {err}");
            BTreeMap::new()
        });
        entries.insert(key.to_string(), value);

        let contents = serde_json::to_string_pretty(&entries).expect("map of integers serializes");
        fs::write(&self.path, contents).map_err(|source| StoreError::Write {
            path: self.path.display().to_string(),
            source,
        })
    }

    fn read_all(&self) -> Result<BTreeMap<String, u32>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.display().to_string(),
                    source,
                });
            }
        };

        serde_json::from_str(&contents).map_err(|source| StoreError::Parse {
            path: self.path.display().to_string(),
            source,
        })
    }
}
