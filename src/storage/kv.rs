//! String-keyed durable store
//!
//! The engine treats persistence as an opaque key/value boundary: write a
//! string under a fixed key, read it back later. [`FileStore`] keeps one
//! file per key in the data directory with file locking and atomic
//! replacement; [`MemoryStore`] backs tests.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use fs2::FileExt;
use thiserror::Error;

/// Failure at the persistence boundary
///
/// Never fatal: readers fall back to the empty initial state, writers drop
/// the snapshot and retry on the next transition.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read stored value: {0}")]
    Read(String),

    #[error("failed to write stored value: {0}")]
    Write(String),

    #[error("stored value is malformed: {0}")]
    Malformed(String),
}

/// A durable store of string values under string keys
pub trait KeyValueStore {
    /// Reads the value under `key`, or `None` if absent
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// File-per-key store rooted at a data directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`; the directory is created lazily on
    /// first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let file = File::open(&path)
            .map_err(|e| StoreError::Read(format!("{}: {}", path.display(), e)))?;

        // Shared lock for reading
        file.lock_shared()
            .map_err(|e| StoreError::Read(format!("{}: {}", path.display(), e)))?;

        let mut contents = String::new();
        (&file)
            .read_to_string(&mut contents)
            .map_err(|e| StoreError::Read(format!("{}: {}", path.display(), e)))?;

        // Lock is released when the file is dropped
        Ok(Some(contents))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| StoreError::Write(format!("{}: {}", self.dir.display(), e)))?;

        let path = self.path_for(key);
        let temp_path = path.with_extension("json.tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .map_err(|e| StoreError::Write(format!("{}: {}", temp_path.display(), e)))?;

            // Exclusive lock for writing
            file.lock_exclusive()
                .map_err(|e| StoreError::Write(format!("{}: {}", temp_path.display(), e)))?;

            (&file)
                .write_all(value.as_bytes())
                .map_err(|e| StoreError::Write(format!("{}: {}", temp_path.display(), e)))?;

            (&file)
                .flush()
                .map_err(|e| StoreError::Write(format!("{}: {}", temp_path.display(), e)))?;
        }

        // Atomic rename
        fs::rename(&temp_path, &path)
            .map_err(|e| StoreError::Write(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }
}

/// In-memory store for tests; clones share the same map
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
