//! Trending aggregator
//!
//! Ranks recorded interactions inside a time window, enriches the top
//! entries with provider metadata and caches the result per (scope, window).

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::db::Storage;
use crate::models::{EnrichedContent, InteractionRecord, TimeWindow, TrendingScope};
use crate::services::interactions::load_table;
use crate::services::providers::{fetch_details, MetadataProvider};
use crate::services::TrendingCache;

/// Service for trending content discovery
#[derive(Clone)]
pub struct TrendingService {
    storage: Storage,
    cache: TrendingCache,
    provider: Arc<dyn MetadataProvider>,
    enrichment_timeout: Duration,
}

impl TrendingService {
    pub fn new(
        storage: Storage,
        cache: TrendingCache,
        provider: Arc<dyn MetadataProvider>,
        enrichment_timeout: Duration,
    ) -> Self {
        Self {
            storage,
            cache,
            provider,
            enrichment_timeout,
        }
    }

    /// Get up to `limit` trending entries for `scope` within `window`
    ///
    /// A fresh cache entry is returned as-is, even if interactions were
    /// recorded since it was computed. Never fails: storage errors yield an
    /// empty list and enrichment errors degrade single entries.
    pub async fn get_trending(
        &self,
        scope: TrendingScope,
        limit: usize,
        window: TimeWindow,
    ) -> Vec<EnrichedContent> {
        if limit == 0 {
            return Vec::new();
        }

        if let Some(cached) = self.cache.get(scope, window, limit) {
            debug!(scope = %scope, window = %window, "Trending cache hit");
            return cached;
        }

        debug!(scope = %scope, window = %window, "Trending cache miss");

        let records = match load_table(&self.storage) {
            Ok(table) => table.into_values().collect::<Vec<_>>(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to read interactions for trending");
                return Vec::new();
            }
        };

        let ranked = rank(records, scope, window, limit, Utc::now());
        let trending = self.enrich(ranked).await;

        self.cache.put(scope, window, limit, &trending);

        info!(
            scope = %scope,
            window = %window,
            results = trending.len(),
            enriched = trending.iter().filter(|c| c.is_enriched()).count(),
            provider = self.provider.name(),
            "Trending computed"
        );

        trending
    }

    /// Fetches metadata for every ranked record in parallel
    ///
    /// Output order follows the ranking. A failed, timed out or panicked
    /// fetch keeps the entry with local fields only.
    async fn enrich(&self, ranked: Vec<InteractionRecord>) -> Vec<EnrichedContent> {
        let mut tasks = Vec::with_capacity(ranked.len());

        for record in ranked {
            let provider = Arc::clone(&self.provider);
            let identity = record.identity();
            let timeout = self.enrichment_timeout;
            let task = tokio::spawn(async move {
                fetch_details(provider.as_ref(), &identity, timeout).await
            });
            tasks.push((record, task));
        }

        let mut results = Vec::with_capacity(tasks.len());
        let mut failures = 0;

        for (record, task) in tasks {
            let details = match task.await {
                Ok(Ok(details)) => Some(details),
                Ok(Err(e)) => {
                    warn!(
                        content_id = %record.content_id,
                        content_type = %record.content_type,
                        error = %e,
                        "Metadata enrichment failed"
                    );
                    failures += 1;
                    None
                }
                Err(e) => {
                    tracing::error!(error = %e, "Enrichment task join error");
                    failures += 1;
                    None
                }
            };
            results.push(EnrichedContent::from_record(&record, details));
        }

        if failures > 0 {
            warn!(
                success_count = results.len() - failures,
                error_count = failures,
                "Partial enrichment failure"
            );
        }

        results
    }
}

/// Selects the top `limit` records for `scope` touched within `window` of `now`
///
/// Ties keep their input order.
pub fn rank(
    records: Vec<InteractionRecord>,
    scope: TrendingScope,
    window: TimeWindow,
    limit: usize,
    now: DateTime<Utc>,
) -> Vec<InteractionRecord> {
    let cutoff = now - window.duration();

    let mut ranked: Vec<InteractionRecord> = records
        .into_iter()
        .filter(|r| r.last_interaction_at >= cutoff)
        .filter(|r| scope.matches(r.content_type))
        .filter(|r| r.total_score > 0)
        .collect();

    ranked.sort_by(|a, b| b.total_score.cmp(&a.total_score));
    ranked.truncate(limit);
    ranked
}
