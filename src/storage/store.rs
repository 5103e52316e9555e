//! The namespaced store adapter: serde, degradation boundary, collection
//! helpers.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config;
use crate::models::HasId;

use super::StoragePort;

/// Namespaced JSON store over an injected backend.
///
/// Every failure at this boundary is logged and degraded to a default value
/// (`None`, empty collection, `false`); callers branch on values, never on
/// error types. An empty collection is therefore indistinguishable from a
/// failed read — an accepted ambiguity.
///
/// Collection operations are full read-modify-write: the entire collection is
/// read, mutated in memory and written back. Concurrent writers can clobber
/// each other; the execution model is single-session.
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn StoragePort>,
    prefix: String,
}

impl Store {
    /// Store with the standard `hospital_` namespace.
    pub fn new(backend: Arc<dyn StoragePort>) -> Self {
        Self::with_prefix(backend, config::STORAGE_PREFIX)
    }

    pub fn with_prefix(backend: Arc<dyn StoragePort>, prefix: impl Into<String>) -> Self {
        Self {
            backend,
            prefix: prefix.into(),
        }
    }

    fn scoped(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    /// Whether anything is stored under `key`.
    pub fn contains(&self, key: &str) -> bool {
        match self.backend.get(&self.scoped(key)) {
            Ok(value) => value.is_some(),
            Err(e) => {
                tracing::error!(key, error = %e, "storage read failed");
                false
            }
        }
    }

    /// Reads and deserializes the value under `key`; `None` when absent or on
    /// any storage/deserialization failure.
    pub fn get_item<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.get(&self.scoped(key)) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::error!(key, error = %e, "storage read failed");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!(key, error = %e, "stored value failed to deserialize");
                None
            }
        }
    }

    /// Serializes and writes `value` under `key`; false on failure.
    pub fn set_item<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(key, error = %e, "value failed to serialize");
                return false;
            }
        };
        match self.backend.set(&self.scoped(key), &raw) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(key, error = %e, "storage write failed");
                false
            }
        }
    }

    pub fn remove_item(&self, key: &str) -> bool {
        match self.backend.remove(&self.scoped(key)) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(key, error = %e, "storage remove failed");
                false
            }
        }
    }

    // ── Collection helpers ───────────────────────────────────────────────

    /// The whole collection; empty when absent or unreadable.
    pub fn get_collection<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        self.get_item(key).unwrap_or_default()
    }

    pub fn set_collection<T: Serialize>(&self, key: &str, collection: &[T]) -> bool {
        self.set_item(key, collection)
    }

    /// Appends one entity and writes the collection back.
    pub fn add_to_collection<T>(&self, key: &str, item: &T) -> bool
    where
        T: Serialize + DeserializeOwned + Clone,
    {
        let mut collection: Vec<T> = self.get_collection(key);
        collection.push(item.clone());
        self.set_collection(key, &collection)
    }

    /// Applies `patch` to the entity with `id` and writes the collection
    /// back. `None` when the id is absent.
    pub fn update_in_collection<T>(
        &self,
        key: &str,
        id: &str,
        patch: impl FnOnce(&mut T),
    ) -> Option<T>
    where
        T: Serialize + DeserializeOwned + HasId + Clone,
    {
        let mut collection: Vec<T> = self.get_collection(key);
        let item = collection.iter_mut().find(|item| item.id() == id)?;
        patch(item);
        let updated = item.clone();
        self.set_collection(key, &collection);
        Some(updated)
    }

    /// Removes the entity with `id`; false when no entity matched.
    pub fn remove_from_collection<T>(&self, key: &str, id: &str) -> bool
    where
        T: Serialize + DeserializeOwned + HasId,
    {
        let mut collection: Vec<T> = self.get_collection(key);
        let before = collection.len();
        collection.retain(|item| item.id() != id);
        if collection.len() == before {
            return false;
        }
        self.set_collection(key, &collection)
    }

    pub fn find_in_collection<T>(&self, key: &str, id: &str) -> Option<T>
    where
        T: DeserializeOwned + HasId,
    {
        self.get_collection(key)
            .into_iter()
            .find(|item: &T| item.id() == id)
    }

    pub fn filter_collection<T: DeserializeOwned>(
        &self,
        key: &str,
        predicate: impl Fn(&T) -> bool,
    ) -> Vec<T> {
        let mut collection: Vec<T> = self.get_collection(key);
        collection.retain(|item| predicate(item));
        collection
    }
}
