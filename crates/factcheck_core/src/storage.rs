//! Durable key-value storage
//!
//! The history store (and the theme toggle, which lives in the UI layer)
//! persist through a tiny get/set interface so the core never touches the
//! filesystem directly. `FileStorage` keeps one JSON file per key;
//! `MemoryStorage` backs tests and ephemeral sessions.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Minimal durable key-value interface.
///
/// `get` treats every read failure as absence; only writes can fail.
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// File-backed storage: one file per sanitized key under a directory.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open or create the storage directory.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create storage directory: {:?}", dir))?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Sanitize the key for the filesystem
        let safe = key.replace(['/', '\\', ':'], "_");
        self.dir.join(format!("{}.json", safe))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        fs::write(&path, value).with_context(|| format!("Failed to write {:?}", path))
    }
}

/// In-memory storage for tests and sessions without durable state.
#[derive(Default)]
pub struct MemoryStorage {
    map: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a key, e.g. with a legacy or corrupt snapshot.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.map.write().unwrap().insert(key.into(), value.into());
        storage
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.map.read().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.map.write().unwrap().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_storage_roundtrip() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::open(dir.path().join("store")).unwrap();

        assert!(storage.get("fact-check-history").is_none());
        storage.set("fact-check-history", "[]").unwrap();
        assert_eq!(storage.get("fact-check-history").as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_storage_sanitizes_keys() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();

        storage.set("a/b:c", "v").unwrap();
        assert_eq!(storage.get("a/b:c").as_deref(), Some("v"));
        assert!(dir.path().join("a_b_c.json").exists());
    }

    #[test]
    fn test_memory_storage_overwrites() {
        let storage = MemoryStorage::new();
        storage.set("k", "1").unwrap();
        storage.set("k", "2").unwrap();
        assert_eq!(storage.get("k").as_deref(), Some("2"));
    }
}
