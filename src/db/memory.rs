use dashmap::DashMap;

use crate::db::KeyValueStore;
use crate::error::{StoreError, StoreResult};

/// In-process key-value store with an optional byte quota
///
/// The quota counts key and value bytes, mirroring how browser storage
/// enforces its per-origin limit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that refuses writes pushing total usage past `quota_bytes`
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: DashMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Bytes currently used by keys and values
    pub fn used_bytes(&self) -> usize {
        self.entries
            .iter()
            .map(|entry| entry.key().len() + entry.value().len())
            .sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        if let Some(quota) = self.quota_bytes {
            let replaced = self
                .entries
                .get(key)
                .map(|entry| key.len() + entry.value().len())
                .unwrap_or(0);
            let available = quota.saturating_sub(self.used_bytes() - replaced);
            let needed = key.len() + value.len();
            if needed > available {
                return Err(StoreError::QuotaExceeded { needed, available });
            }
        }

        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn keys_with_prefix(&self, prefix: &str) -> StoreResult<Vec<String>> {
        Ok(self
            .entries
            .iter()
            .filter(|entry| entry.key().starts_with(prefix))
            .map(|entry| entry.key().clone())
            .collect())
    }
}
