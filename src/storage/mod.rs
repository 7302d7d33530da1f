//! Durable key-value storage for session state.
//!
//! The engine treats storage as an opaque string store. [`MemoryStore`] backs
//! tests and throwaway sessions; [`FileStore`] keeps one JSON file per key in
//! a directory.

pub mod persist;
pub mod schema;

pub use persist::{load_state, save_state, LoadedState, StateOrigin};
pub use schema::{
    decode_legacy_state, decode_state, migrate, Preferences, StoredState, StoredStateV1,
    ViewMode, LEGACY_STATE_KEY, STATE_KEY,
};

use crate::core::{Error, Result};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::warn;

/// Key-value store abstraction.
///
/// Implementations should be thread-safe (`Send + Sync`) so a store can be
/// shared between sessions.
pub trait KeyValueStore: Send + Sync {
    /// Stored value for `key`, `None` when absent or unreadable.
    fn get(&self, key: &str) -> Option<String>;

    /// Store a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` or `Error::FileSystem` if the write fails.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one value, handy for migration tests.
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        if let Ok(mut data) = store.data.write() {
            data.insert(key.to_string(), value.to_string());
        }
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.data.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.data
            .write()
            .map_err(|e| Error::Storage(format!("Store write lock failed: {}", e)))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.data
            .write()
            .map_err(|e| Error::Storage(format!("Store write lock failed: {}", e)))?
            .remove(key);
        Ok(())
    }
}

/// Directory-backed store: `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding `key`. Characters outside `[A-Za-z0-9._-]` become `_`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let file: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{file}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Some(contents),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read stored value");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            Error::file_system_with_source("Cannot create store directory", &self.dir, e)
        })?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)
            .map_err(|e| Error::file_system_with_source("Cannot write stored value", &tmp, e))?;
        fs::rename(&tmp, &path)
            .map_err(|e| Error::file_system_with_source("Cannot replace stored value", &path, e))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
