/// Content metadata provider abstraction
///
/// The trending aggregator enriches ranked entries through this trait. Any
/// error a provider returns is treated as "no metadata for this item" by the
/// caller, never as a failure of the whole list.
use std::time::Duration;

use crate::{
    error::{AppError, AppResult},
    models::{ContentDetails, ContentIdentity, ContentType},
};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for content metadata providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetch details for a movie by provider ID
    async fn movie_details(&self, id: &str) -> AppResult<ContentDetails>;

    /// Fetch details for a TV show by provider ID
    ///
    /// Anime is catalogued as TV by the upstream database.
    async fn tv_details(&self, id: &str) -> AppResult<ContentDetails>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Fetches details for `identity`, giving up after `timeout`
pub async fn fetch_details(
    provider: &dyn MetadataProvider,
    identity: &ContentIdentity,
    timeout: Duration,
) -> AppResult<ContentDetails> {
    let request = async {
        match identity.content_type {
            ContentType::Movie => provider.movie_details(&identity.content_id).await,
            ContentType::Tv | ContentType::Anime => {
                provider.tv_details(&identity.content_id).await
            }
        }
    };

    tokio::time::timeout(timeout, request)
        .await
        .map_err(|_| AppError::Timeout(timeout))?
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(title: &str) -> ContentDetails {
        ContentDetails {
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_movie_uses_movie_endpoint() {
        let mut provider = MockMetadataProvider::new();
        provider
            .expect_movie_details()
            .withf(|id| id == "42")
            .times(1)
            .returning(|_| Ok(details("Inception")));
        provider.expect_tv_details().never();

        let identity = ContentIdentity::new("42", ContentType::Movie).unwrap();
        let result = fetch_details(&provider, &identity, Duration::from_secs(1)).await;

        assert_eq!(result.unwrap().title.as_deref(), Some("Inception"));
    }

    #[tokio::test]
    async fn test_anime_uses_tv_endpoint() {
        let mut provider = MockMetadataProvider::new();
        provider.expect_movie_details().never();
        provider
            .expect_tv_details()
            .times(1)
            .returning(|_| Ok(details("Cowboy Bebop")));

        let identity = ContentIdentity::new("30991", ContentType::Anime).unwrap();
        let result = fetch_details(&provider, &identity, Duration::from_secs(1)).await;

        assert_eq!(result.unwrap().title.as_deref(), Some("Cowboy Bebop"));
    }

    struct SlowProvider;

    #[async_trait::async_trait]
    impl MetadataProvider for SlowProvider {
        async fn movie_details(&self, _id: &str) -> AppResult<ContentDetails> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(ContentDetails::default())
        }

        async fn tv_details(&self, id: &str) -> AppResult<ContentDetails> {
            self.movie_details(id).await
        }

        fn name(&self) -> &'static str {
            "slow"
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_provider_times_out() {
        let identity = ContentIdentity::new("1", ContentType::Movie).unwrap();
        let result = fetch_details(&SlowProvider, &identity, Duration::from_secs(10)).await;

        assert!(matches!(result, Err(AppError::Timeout(d)) if d == Duration::from_secs(10)));
    }
}
