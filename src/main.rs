use std::sync::Arc;

use anyhow::bail;
use screenpulse::models::{TimeWindow, TrendingScope};
use screenpulse::services::{TmdbProvider, TracingAnalytics, TrendingServices};
use screenpulse::{Config, RedisStore, Storage};
use tracing_subscriber::EnvFilter;

const WARM_LIMIT: usize = 20;

/// Maintenance job: prune stale interactions, report stats, rewarm trending lists
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let settings = config.trending_settings();

    let storage = match &config.redis_url {
        Some(url) => Storage::new(Arc::new(RedisStore::open(url)?)),
        None => {
            tracing::warn!("REDIS_URL not set, running against an empty in-memory store");
            Storage::in_memory()
        }
    };

    let provider = TmdbProvider::new(
        config.tmdb_api_key.clone().unwrap_or_default(),
        config.tmdb_api_url.clone(),
    );
    let services = TrendingServices::new(
        storage,
        Arc::new(provider),
        Arc::new(TracingAnalytics),
        settings,
    );

    if !services.stats.prune_older_than(settings.retention_days) {
        bail!("Retention pruning failed");
    }

    let stats = services.stats.get_stats();
    tracing::info!(
        total_content = stats.total_content,
        total_interactions = stats.total_interactions,
        total_score = stats.total_score,
        "Interaction stats"
    );
    println!("{}", serde_json::to_string_pretty(&stats)?);

    if config.tmdb_api_key.is_none() {
        tracing::info!("TMDB_API_KEY not set, skipping trending warm-up");
        return Ok(());
    }

    for window in TimeWindow::ALL {
        let trending = services
            .trending
            .get_trending(TrendingScope::All, WARM_LIMIT, window)
            .await;
        tracing::info!(window = %window, results = trending.len(), "Trending list warmed");
    }

    Ok(())
}
