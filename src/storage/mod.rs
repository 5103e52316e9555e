//! Namespaced key-value persistence.
//!
//! `StoragePort` is the injected raw backend — in-memory or one JSON document
//! per key on disk. `Store` layers the namespace prefix, serde, the
//! collection helpers and the degradation boundary on top: storage failures
//! are logged and turned into safe defaults, never surfaced to callers.

pub mod backend;
pub mod store;

pub use backend::{FileBackend, MemoryBackend};
pub use store::Store;

use thiserror::Error;

/// Failures at the storage boundary. Nothing above `Store` ever sees these;
/// the adapter logs and degrades to a default value.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// Raw persistence port. Keys arrive already namespaced.
pub trait StoragePort: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
