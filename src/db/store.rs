use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Display;
use std::sync::Arc;

use crate::error::{StoreError, StoreResult};
use crate::models::{TimeWindow, TrendingScope};

use super::MemoryStore;

/// Prefix shared by every trending cache entry
pub const TRENDING_CACHE_PREFIX: &str = "trending_cache_";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Interactions,
    Trending(TrendingScope, TimeWindow),
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageKey::Interactions => write!(f, "content_interactions"),
            StorageKey::Trending(scope, window) => {
                write!(f, "{}{}_{}", TRENDING_CACHE_PREFIX, scope, window)
            }
        }
    }
}

/// Synchronous string-keyed storage
///
/// Implementations must be cheap to call from any thread. There is no
/// compare-and-swap: callers doing read-modify-write accept last-write-wins.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    fn remove(&self, key: &str) -> StoreResult<()>;

    /// Every key starting with `prefix`
    fn keys_with_prefix(&self, prefix: &str) -> StoreResult<Vec<String>>;

    /// Removes every key starting with `prefix`, returning how many were removed
    fn remove_prefix(&self, prefix: &str) -> StoreResult<usize> {
        let keys = self.keys_with_prefix(prefix)?;
        for key in &keys {
            self.remove(key)?;
        }
        Ok(keys.len())
    }
}

/// JSON adapter over a [`KeyValueStore`]
#[derive(Clone)]
pub struct Storage {
    backend: Arc<dyn KeyValueStore>,
}

impl Storage {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Storage over a fresh, unbounded in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Reads and decodes the value under `key`
    ///
    /// A value that is present but fails to decode is reported as
    /// [`StoreError::Corrupted`] so callers never mistake it for absence.
    pub fn get_json<T: DeserializeOwned>(&self, key: &StorageKey) -> StoreResult<Option<T>> {
        let key = key.to_string();
        match self.backend.get(&key)? {
            Some(json) => serde_json::from_str(&json).map(Some).map_err(|e| {
                tracing::warn!(key = %key, error = %e, "Stored value failed to decode");
                StoreError::Corrupted(key)
            }),
            None => Ok(None),
        }
    }

    /// Encodes `value` and writes it under `key`
    pub fn set_json<T: Serialize>(&self, key: &StorageKey, value: &T) -> StoreResult<()> {
        let json = serde_json::to_string(value)?;
        self.backend.set(&key.to_string(), &json)
    }

    pub fn remove(&self, key: &StorageKey) -> StoreResult<()> {
        self.backend.remove(&key.to_string())
    }

    /// Removes every key under `prefix`, returning how many were removed
    pub fn remove_prefix(&self, prefix: &str) -> StoreResult<usize> {
        self.backend.remove_prefix(prefix)
    }

    /// Direct access to the underlying store
    pub fn backend(&self) -> &Arc<dyn KeyValueStore> {
        &self.backend
    }
}
