use chrono::{DateTime, Duration, Utc};

use crate::db::Storage;
use crate::models::{GlobalStats, InteractionRecord, InteractionTable, TimeWindow};
use crate::services::interactions::{load_table, save_table};
use crate::services::TrendingCache;

/// Global statistics and retention maintenance over recorded interactions
#[derive(Clone)]
pub struct StatsService {
    storage: Storage,
    cache: TrendingCache,
}

impl StatsService {
    pub fn new(storage: Storage, cache: TrendingCache) -> Self {
        Self { storage, cache }
    }

    /// Computes global statistics; empty stats if the store is unreadable
    pub fn get_stats(&self) -> GlobalStats {
        match load_table(&self.storage) {
            Ok(table) => compute_stats(table.values(), Utc::now()),
            Err(e) => {
                tracing::error!(error = %e, "Failed to read interactions for stats");
                GlobalStats::default()
            }
        }
    }

    /// Removes records last touched more than `days` ago
    ///
    /// Cached trending lists are dropped before the pruned table is written,
    /// so a later `get_trending` never serves a pruned record. Returns
    /// `false` and leaves the table unchanged if the table cannot be read or
    /// written, or the cache cannot be invalidated.
    pub fn prune_older_than(&self, days: u32) -> bool {
        // A window reaching past the representable range has no cutoff.
        let cutoff = Utc::now().checked_sub_signed(Duration::days(i64::from(days)));

        let table = match load_table(&self.storage) {
            Ok(table) => table,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read interactions for pruning");
                return false;
            }
        };

        let before = table.len();
        let retained: InteractionTable = table
            .into_iter()
            .filter(|(_, record)| cutoff.map_or(true, |cutoff| record.last_interaction_at >= cutoff))
            .collect();
        let removed = before - retained.len();

        if let Err(e) = self.cache.invalidate_all() {
            tracing::error!(error = %e, "Failed to invalidate trending cache before pruning");
            return false;
        }

        if let Err(e) = save_table(&self.storage, &retained) {
            tracing::error!(error = %e, "Failed to persist pruned interactions");
            return false;
        }

        tracing::info!(
            days = days,
            removed = removed,
            retained = retained.len(),
            "Pruned stale interactions"
        );
        true
    }
}

/// Single pass over `records` producing totals and per-bucket counts
pub fn compute_stats<'a>(
    records: impl IntoIterator<Item = &'a InteractionRecord>,
    now: DateTime<Utc>,
) -> GlobalStats {
    let day = now - TimeWindow::Day.duration();
    let week = now - TimeWindow::Week.duration();
    let month = now - TimeWindow::Month.duration();

    let mut stats = GlobalStats::default();

    for record in records {
        stats.total_content += 1;
        stats.total_score += record.total_score;
        *stats.by_content_type.entry(record.content_type).or_insert(0) += 1;

        for (kind, count) in &record.interactions {
            stats.total_interactions += count;
            *stats.by_interaction.entry(kind.clone()).or_insert(0) += count;
        }

        if record.last_interaction_at >= day {
            stats.recent_activity.last_day += 1;
        }
        if record.last_interaction_at >= week {
            stats.recent_activity.last_week += 1;
        }
        if record.last_interaction_at >= month {
            stats.recent_activity.last_month += 1;
        }
    }

    stats
}
