use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::db::{Storage, StorageKey, TRENDING_CACHE_PREFIX};
use crate::error::StoreResult;
use crate::models::{EnrichedContent, TimeWindow, TrendingScope};

/// Persisted form of a cached trending list
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedTrending {
    data: Vec<EnrichedContent>,
    timestamp: DateTime<Utc>,
    /// Limit the list was computed for; smaller requests are served by truncation
    #[serde(default)]
    limit: usize,
}

/// Time-boxed cache of enriched trending lists, one entry per (scope, window)
#[derive(Clone)]
pub struct TrendingCache {
    storage: Storage,
    ttl: Duration,
}

impl TrendingCache {
    pub fn new(storage: Storage, ttl: std::time::Duration) -> Self {
        Self {
            storage,
            ttl: Duration::from_std(ttl).unwrap_or(Duration::MAX),
        }
    }

    /// Returns the cached list for `(scope, window)` if it is fresh and was
    /// computed for at least `limit` entries
    ///
    /// Missing, expired and unreadable entries are all misses.
    pub fn get(
        &self,
        scope: TrendingScope,
        window: TimeWindow,
        limit: usize,
    ) -> Option<Vec<EnrichedContent>> {
        let key = StorageKey::Trending(scope, window);
        let entry: CachedTrending = match self.storage.get_json(&key) {
            Ok(Some(entry)) => entry,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Trending cache read failed");
                return None;
            }
        };

        if Utc::now() - entry.timestamp > self.ttl {
            tracing::debug!(key = %key, cached_at = %entry.timestamp, "Trending cache expired");
            return None;
        }

        if entry.limit < limit {
            tracing::debug!(
                key = %key,
                cached_limit = entry.limit,
                requested = limit,
                "Trending cache entry too short"
            );
            return None;
        }

        let mut data = entry.data;
        data.truncate(limit);
        Some(data)
    }

    /// Stores `data` for `(scope, window)` stamped with the current time
    pub fn put(&self, scope: TrendingScope, window: TimeWindow, limit: usize, data: &[EnrichedContent]) {
        self.store_entry(scope, window, limit, data, Utc::now());
    }

    fn store_entry(
        &self,
        scope: TrendingScope,
        window: TimeWindow,
        limit: usize,
        data: &[EnrichedContent],
        timestamp: DateTime<Utc>,
    ) {
        let key = StorageKey::Trending(scope, window);
        let entry = CachedTrending {
            data: data.to_vec(),
            timestamp,
            limit,
        };

        if let Err(e) = self.storage.set_json(&key, &entry) {
            tracing::error!(key = %key, error = %e, "Failed to write trending cache");
        }
    }

    /// Drops every cached list across all scopes and windows
    pub fn invalidate_all(&self) -> StoreResult<usize> {
        let removed = self.storage.remove_prefix(TRENDING_CACHE_PREFIX)?;
        tracing::info!(removed = removed, "Trending cache invalidated");
        Ok(removed)
    }
}
