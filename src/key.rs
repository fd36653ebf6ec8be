//! Content-derived lookup keys.
//!
//! A key is computed from the content bytes alone: SHA-256 digest, standard
//! base64 encoding, every non-alphanumeric character stripped, trailing 8
//! characters kept. The same content always yields the same key.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Trailing characters kept from the cleaned encoding.
pub const KEY_LEN: usize = 8;

/// A short printable key addressing one stored content blob.
///
/// Truncation to 8 characters trades collision resistance for short
/// URL-friendly keys. The full digest is not retained, so two distinct
/// contents that truncate to the same key address the same entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(String);

impl Key {
    /// Derive the key for a content blob.
    ///
    /// Total over any input; callers reject empty content before storage,
    /// not here. If the cleaned encoding is shorter than 8 characters the
    /// whole cleaned string becomes the key, so callers must not assume a
    /// fixed length.
    pub fn derive(content: &[u8]) -> Self {
        let digest = Sha256::digest(content);
        let encoded = BASE64.encode(digest);
        let cleaned: String = encoded
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        let start = cleaned.len().saturating_sub(KEY_LEN);
        Self(cleaned[start..].to_string())
    }

    /// Wrap a key string received from a client lookup.
    ///
    /// No format validation: an unknown key is a store miss, not a
    /// malformed request.
    pub fn from_raw(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
