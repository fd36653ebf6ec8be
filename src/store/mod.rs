//! Storage backends
//!
//! This module defines the ContentStore trait and its implementations.

pub mod file;
pub mod memory;

use crate::key::Key;
use thiserror::Error;

/// Storage errors
///
/// Absence of an entry and backend failure are distinct conditions and are
/// never collapsed into one another at the HTTP boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no entry for key")]
    NotFound,

    #[error("storage unavailable: {0}")]
    Unavailable(#[from] std::io::Error),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Associative persistence for content entries.
///
/// `put` overwrites unconditionally: re-deriving the same key from
/// identical content is the normal idempotent case. Two distinct contents
/// truncating to the same key silently overwrite each other; the full
/// digest is not kept, so the store cannot tell the difference.
pub trait ContentStore: Send + Sync {
    /// Store value under key, replacing any existing entry.
    fn put(&self, key: &Key, value: &[u8]) -> StoreResult<()>;

    /// Fetch the stored value for key.
    fn get(&self, key: &Key) -> StoreResult<Vec<u8>>;

    /// Check for an entry without fetching it.
    fn exists(&self, key: &Key) -> bool;
}

pub use file::FileStore;
pub use memory::MemoryStore;
