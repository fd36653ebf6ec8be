//! In-memory content store
//!
//! HashMap-backed store keeping entries for the life of the process. Serves
//! as the injected test double and as an ephemeral backend.

use super::{ContentStore, StoreError, StoreResult};
use crate::key::Key;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory content store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    /// Whether the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ContentStore for MemoryStore {
    fn put(&self, key: &Key, value: &[u8]) -> StoreResult<()> {
        self.entries
            .write()
            .unwrap()
            .insert(key.as_str().to_string(), value.to_vec());
        Ok(())
    }

    fn get(&self, key: &Key) -> StoreResult<Vec<u8>> {
        self.entries
            .read()
            .unwrap()
            .get(key.as_str())
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    fn exists(&self, key: &Key) -> bool {
        self.entries.read().unwrap().contains_key(key.as_str())
    }
}
