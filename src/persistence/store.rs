//! Keyed byte storage for snapshots.
//!
//! A store holds one record per key and overwrites it wholesale on every
//! write. There is no merging or locking across writers.

use super::error::PersistenceError;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use uuid::Uuid;

/// Device-local keyed storage.
pub trait SnapshotStore: Send + Sync {
    /// Read the record for `key`, or `None` if nothing was saved.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, PersistenceError>;

    /// Replace the record for `key`.
    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), PersistenceError>;

    /// Delete the record for `key`. Deleting a missing record succeeds.
    fn remove(&self, key: &str) -> Result<(), PersistenceError>;
}

/// In-process store, lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn records(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>>, PersistenceError> {
        self.records
            .lock()
            .map_err(|e| PersistenceError::Unavailable(e.to_string()))
    }
}

impl SnapshotStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, PersistenceError> {
        Ok(self.records()?.get(key).cloned())
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), PersistenceError> {
        self.records()?.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        self.records()?.remove(key);
        Ok(())
    }
}

/// One file per key under a directory.
///
/// Writes go to a temporary file that is renamed over the record, so a
/// crash mid-write never leaves a truncated snapshot behind.
///
/// Calls block on the filesystem. The session shell runs them on Tokio's
/// blocking pool.
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

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.snapshot"))
    }

    fn io(key: &str, source: std::io::Error) -> PersistenceError {
        PersistenceError::Io {
            key: key.to_string(),
            source,
        }
    }
}

impl SnapshotStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, PersistenceError> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io(key, e)),
        }
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), PersistenceError> {
        fs::create_dir_all(&self.dir).map_err(|e| Self::io(key, e))?;

        let path = self.path_for(key);
        let temp = self.dir.join(format!(".{key}.{}.tmp", Uuid::new_v4()));
        fs::write(&temp, bytes).map_err(|e| Self::io(key, e))?;
        if let Err(e) = fs::rename(&temp, &path) {
            let _ = fs::remove_file(&temp);
            return Err(Self::io(key, e));
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io(key, e)),
        }
    }
}
