//! Content-addressable text store served over HTTP
//!
//! Clients POST text and receive a short key derived from the content's
//! SHA-256 digest; a later GET with that key returns the original text.
//! Storage backends are pluggable behind the ContentStore trait.

pub mod config;
pub mod http;
pub mod key;
pub mod store;

pub use config::Config;
pub use key::Key;
pub use store::{ContentStore, StoreError};
