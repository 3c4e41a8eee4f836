//! Storage configuration.
//!
//! A store is described by a [`StoreConfig`], either built in code or read
//! from a TOML file:
//!
//! ```toml
//! path = "clinic.db"
//! busy_timeout_ms = 5000
//! journal_mode = "wal"
//! ```
//!
//! Every key is optional.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Path that selects a private in-memory database.
pub const IN_MEMORY_PATH: &str = ":memory:";

/// Default database file name.
pub const DEFAULT_DB_FILE: &str = "vetrecords.db";

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// SQLite journal mode applied to file-backed stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalMode {
    Delete,
    Wal,
}

impl JournalMode {
    pub fn as_str(self) -> &'static str {
        match self {
            JournalMode::Delete => "DELETE",
            JournalMode::Wal => "WAL",
        }
    }
}

/// Where and how to open the records store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Database file, or `:memory:`
    pub path: PathBuf,
    /// How long a write waits on a locked database
    pub busy_timeout_ms: u64,
    /// Journal mode for file-backed stores
    pub journal_mode: JournalMode,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DB_FILE),
            busy_timeout_ms: 5_000,
            journal_mode: JournalMode::Wal,
        }
    }
}

impl StoreConfig {
    /// Defaults with the database at `path`.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Defaults with a private in-memory database.
    pub fn in_memory() -> Self {
        Self::at(IN_MEMORY_PATH)
    }

    pub fn is_in_memory(&self) -> bool {
        self.path.as_os_str() == IN_MEMORY_PATH
    }

    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}
