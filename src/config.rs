use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key used for metadata enrichment
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Redis connection URL. Falls back to an in-memory store when unset.
    #[serde(default)]
    pub redis_url: Option<String>,

    /// Lifetime of a cached trending list, in seconds
    #[serde(default = "default_trending_cache_ttl_secs")]
    pub trending_cache_ttl_secs: u64,

    /// Records untouched for longer than this are pruned by maintenance
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,

    /// Per-item bound on metadata enrichment calls, in seconds
    #[serde(default = "default_enrichment_timeout_secs")]
    pub enrichment_timeout_secs: u64,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_trending_cache_ttl_secs() -> u64 {
    1800
}

fn default_retention_days() -> u32 {
    30
}

fn default_enrichment_timeout_secs() -> u64 {
    10
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Tunables handed to the trending services
    pub fn trending_settings(&self) -> TrendingSettings {
        TrendingSettings {
            cache_ttl: Duration::from_secs(self.trending_cache_ttl_secs),
            enrichment_timeout: Duration::from_secs(self.enrichment_timeout_secs),
            retention_days: self.retention_days,
        }
    }
}

/// Runtime knobs shared by the recorder, aggregator and maintenance services
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendingSettings {
    pub cache_ttl: Duration,
    pub enrichment_timeout: Duration,
    pub retention_days: u32,
}

impl Default for TrendingSettings {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(default_trending_cache_ttl_secs()),
            enrichment_timeout: Duration::from_secs(default_enrichment_timeout_secs()),
            retention_days: default_retention_days(),
        }
    }
}
