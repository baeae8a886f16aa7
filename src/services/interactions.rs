//! Interaction recorder
//!
//! Every call is a read-modify-write of the whole interaction table. Two
//! writers interleaving on the same store (two processes, two tabs sharing a
//! Redis instance) can lose an increment: the later write wins. The store
//! has no compare-and-swap, so this is accepted rather than papered over.

use chrono::Utc;
use serde_json::json;
use std::sync::Arc;

use crate::db::{Storage, StorageKey};
use crate::error::{AppResult, StoreResult};
use crate::models::{ContentIdentity, InteractionKind, InteractionRecord, InteractionTable, MetadataBag};
use crate::services::analytics::{self, AnalyticsSink};
use crate::services::TrendingCache;

/// Analytics event emitted for every recorded interaction
pub const INTERACTION_EVENT: &str = "content_interaction";

/// Loads the interaction table; a missing table is empty
pub(crate) fn load_table(storage: &Storage) -> StoreResult<InteractionTable> {
    Ok(storage
        .get_json(&StorageKey::Interactions)?
        .unwrap_or_default())
}

pub(crate) fn save_table(storage: &Storage, table: &InteractionTable) -> StoreResult<()> {
    storage.set_json(&StorageKey::Interactions, table)
}

/// Records user interactions and maintains per-content scores
#[derive(Clone)]
pub struct InteractionRecorder {
    storage: Storage,
    cache: TrendingCache,
    analytics: Arc<dyn AnalyticsSink>,
}

impl InteractionRecorder {
    pub fn new(storage: Storage, cache: TrendingCache, analytics: Arc<dyn AnalyticsSink>) -> Self {
        Self {
            storage,
            cache,
            analytics,
        }
    }

    /// Records one interaction of `kind` against `identity`
    ///
    /// Returns the updated record, or `Ok(None)` when the store could not be
    /// read or written. Only an invalid identity is reported as an error.
    pub fn record_interaction(
        &self,
        identity: &ContentIdentity,
        kind: InteractionKind,
        metadata: Option<MetadataBag>,
    ) -> AppResult<Option<InteractionRecord>> {
        identity.validate()?;

        let record = match self.apply(identity, &kind, metadata) {
            Ok(record) => record,
            Err(e) => {
                tracing::error!(
                    content = %identity,
                    kind = %kind,
                    error = %e,
                    "Failed to record interaction"
                );
                return Ok(None);
            }
        };

        tracing::debug!(
            content = %identity,
            kind = %kind,
            total_score = record.total_score,
            "Interaction recorded"
        );

        analytics::emit(
            self.analytics.as_ref(),
            INTERACTION_EVENT,
            &json!({
                "content_id": identity.content_id,
                "content_type": identity.content_type,
                "interaction_type": kind,
                "weight": kind.weight(),
                "total_score": record.total_score,
            }),
        );

        Ok(Some(record))
    }

    fn apply(
        &self,
        identity: &ContentIdentity,
        kind: &InteractionKind,
        metadata: Option<MetadataBag>,
    ) -> StoreResult<InteractionRecord> {
        let now = Utc::now();
        let mut table = load_table(&self.storage)?;

        let record = table
            .entry(identity.storage_key())
            .or_insert_with(|| InteractionRecord::new(identity, now));
        record.apply(kind, metadata, now);
        let record = record.clone();

        save_table(&self.storage, &table)?;
        Ok(record)
    }

    /// Current record for `identity`, if any
    pub fn get_record(&self, identity: &ContentIdentity) -> Option<InteractionRecord> {
        match load_table(&self.storage) {
            Ok(mut table) => table.remove(&identity.storage_key()),
            Err(e) => {
                tracing::error!(content = %identity, error = %e, "Failed to read interactions");
                None
            }
        }
    }

    /// Every stored record, in storage-key order
    pub fn all_records(&self) -> StoreResult<Vec<InteractionRecord>> {
        Ok(load_table(&self.storage)?.into_values().collect())
    }

    /// Deletes all recorded interactions and every cached trending list
    pub fn clear_all(&self) -> bool {
        if let Err(e) = self.storage.remove(&StorageKey::Interactions) {
            tracing::error!(error = %e, "Failed to clear interactions");
            return false;
        }
        if let Err(e) = self.cache.invalidate_all() {
            tracing::error!(error = %e, "Failed to invalidate trending cache after clear");
            return false;
        }
        tracing::info!("All interaction data cleared");
        true
    }
}
