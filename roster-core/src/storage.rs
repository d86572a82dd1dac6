//! Client-side key/value storage
//!
//! Two scopes, mirroring what a browser offers:
//! - [`FileStore`]: persistent, survives restarts (one JSON file per key)
//! - [`MemoryStore`]: lives as long as the process, like a tab-scoped store

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::error::StorageResult;

/// String key/value store
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// Persistent store: `{dir}/{key}.json`
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

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(&path)?))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path(key), value)?;
        tracing::trace!(key, dir = %self.dir.display(), "Stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.path(key);
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }
}

/// Process-lifetime store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("storage"));

        assert_eq!(store.get("session").unwrap(), None);

        store.set("session", "{\"a\":1}").unwrap();
        assert_eq!(store.get("session").unwrap().as_deref(), Some("{\"a\":1}"));
        assert!(temp_dir.path().join("storage/session.json").exists());

        store.remove("session").unwrap();
        assert_eq!(store.get("session").unwrap(), None);

        // Removing a missing key is not an error
        store.remove("session").unwrap();
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        FileStore::new(temp_dir.path()).set("k", "v").unwrap();
        assert_eq!(FileStore::new(temp_dir.path()).get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        store.set("currentUser", "x").unwrap();
        assert_eq!(store.get("currentUser").unwrap().as_deref(), Some("x"));
        store.remove("currentUser").unwrap();
        assert!(store.get("currentUser").unwrap().is_none());
    }
}
