use std::sync::Arc;

use crate::config::TrendingSettings;
use crate::db::Storage;

pub mod analytics;
pub mod interactions;
pub mod providers;
pub mod stats;
pub mod trending;
pub mod trending_cache;

pub use analytics::{AnalyticsSink, TracingAnalytics};
pub use interactions::InteractionRecorder;
pub use providers::{MetadataProvider, TmdbProvider};
pub use stats::StatsService;
pub use trending::TrendingService;
pub use trending_cache::TrendingCache;

/// Every trending service wired to one shared store and cache
#[derive(Clone)]
pub struct TrendingServices {
    pub recorder: InteractionRecorder,
    pub trending: TrendingService,
    pub stats: StatsService,
    pub cache: TrendingCache,
}

impl TrendingServices {
    pub fn new(
        storage: Storage,
        provider: Arc<dyn MetadataProvider>,
        analytics: Arc<dyn AnalyticsSink>,
        settings: TrendingSettings,
    ) -> Self {
        let cache = TrendingCache::new(storage.clone(), settings.cache_ttl);

        Self {
            recorder: InteractionRecorder::new(storage.clone(), cache.clone(), analytics),
            trending: TrendingService::new(
                storage.clone(),
                cache.clone(),
                provider,
                settings.enrichment_timeout,
            ),
            stats: StatsService::new(storage, cache.clone()),
            cache,
        }
    }
}
