//! File-backed content store
//!
//! One file per entry, organized in subdirectories by the first two key
//! characters to keep directory fan-out bounded.

use super::{ContentStore, StoreError, StoreResult};
use crate::key::Key;
use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

/// File-backed content store
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Create a store rooted at the specified path
    pub fn new<P: AsRef<Path>>(base_path: P) -> std::io::Result<Self> {
        let base_path = base_path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path)?;
        Ok(Self { base_path })
    }

    /// Convert a key to its file path (base/XX/YYYYYY)
    fn key_to_path(&self, key: &Key) -> PathBuf {
        let name = key.as_str();
        // Keys shorter than the shard prefix land directly in the base dir
        if name.len() <= 2 {
            return self.base_path.join(name);
        }
        let (prefix, suffix) = name.split_at(2);
        self.base_path.join(prefix).join(suffix)
    }
}

impl ContentStore for FileStore {
    fn put(&self, key: &Key, value: &[u8]) -> StoreResult<()> {
        let path = self.key_to_path(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = File::create(&path)?;
        file.write_all(value)?;
        file.sync_all()?;

        log::debug!("stored entry {} ({} bytes)", key, value.len());
        Ok(())
    }

    fn get(&self, key: &Key) -> StoreResult<Vec<u8>> {
        let path = self.key_to_path(key);
        let mut file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(StoreError::NotFound),
            Err(e) => return Err(StoreError::Unavailable(e)),
        };

        let mut value = Vec::new();
        file.read_to_end(&mut value)?;
        Ok(value)
    }

    fn exists(&self, key: &Key) -> bool {
        self.key_to_path(key).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_put_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path()).unwrap();

        let data = b"hello world";
        let key = Key::derive(data);
        store.put(&key, data).unwrap();

        assert_eq!(store.get(&key).unwrap(), data);
    }

    #[test]
    fn test_get_absent_key() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path()).unwrap();

        let result = store.get(&Key::from_raw("missing1"));
        assert!(matches!(result, Err(StoreError::NotFound)));
    }

    #[test]
    fn test_duplicate_put_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path()).unwrap();

        let data = b"duplicate test";
        let key = Key::derive(data);
        store.put(&key, data).unwrap();
        store.put(&key, data).unwrap();

        assert_eq!(store.get(&key).unwrap(), data);
    }

    #[test]
    fn test_entries_are_sharded_by_prefix() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path()).unwrap();

        let key = Key::from_raw("zYpOLmCQ");
        store.put(&key, b"hello").unwrap();

        assert!(temp_dir.path().join("zY").join("pOLmCQ").is_file());
    }

    #[test]
    fn test_short_key_stored_in_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path()).unwrap();

        let key = Key::from_raw("ab");
        store.put(&key, b"short").unwrap();

        assert!(temp_dir.path().join("ab").is_file());
        assert_eq!(store.get(&key).unwrap(), b"short");
    }

    #[test]
    fn test_exists() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path()).unwrap();

        let key = Key::derive(b"present");
        assert!(!store.exists(&key));
        store.put(&key, b"present").unwrap();
        assert!(store.exists(&key));
    }

    #[test]
    fn test_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let data = b"durable entry";
        let key = Key::derive(data);

        {
            let store = FileStore::new(temp_dir.path()).unwrap();
            store.put(&key, data).unwrap();
        }

        let store = FileStore::new(temp_dir.path()).unwrap();
        assert_eq!(store.get(&key).unwrap(), data);
    }
}
