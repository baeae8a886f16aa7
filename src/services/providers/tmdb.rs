/// TMDB (The Movie Database) metadata provider
///
/// API Flow:
/// 1. Movies: /movie/{id} → title, poster, genres, ...
/// 2. TV and anime: /tv/{id} → name, poster, genres, ...
use crate::{
    error::{AppError, AppResult},
    models::ContentDetails,
    services::providers::MetadataProvider,
};
use reqwest::Client as HttpClient;

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    fn details_url(&self, media: &str, id: &str) -> String {
        format!("{}/{}/{}", self.api_url, media, id)
    }

    async fn get_details(&self, media: &str, id: &str) -> AppResult<ContentDetails> {
        if id.trim().is_empty() {
            return Err(AppError::InvalidInput("TMDB id cannot be empty".to_string()));
        }

        let url = self.details_url(media, id);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("TMDB {} {}", media, id)));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;
        let details: ContentDetails = serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                response = %response_text,
                "Failed to deserialize TMDB response"
            );
            AppError::ExternalApi(format!("Failed to parse TMDB response: {}", e))
        })?;

        tracing::debug!(media = %media, id = %id, provider = "tmdb", "Details fetched");

        Ok(details)
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn movie_details(&self, id: &str) -> AppResult<ContentDetails> {
        self.get_details("movie", id).await
    }

    async fn tv_details(&self, id: &str) -> AppResult<ContentDetails> {
        self.get_details("tv", id).await
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_provider() -> TmdbProvider {
        TmdbProvider::new("test_key".to_string(), "http://test.local/3/".to_string())
    }

    #[test]
    fn test_details_url_movie() {
        let provider = create_test_provider();
        assert_eq!(
            provider.details_url("movie", "27205"),
            "http://test.local/3/movie/27205"
        );
    }

    #[test]
    fn test_details_url_tv() {
        let provider = create_test_provider();
        assert_eq!(provider.details_url("tv", "1396"), "http://test.local/3/tv/1396");
    }

    #[test]
    fn test_provider_name() {
        assert_eq!(create_test_provider().name(), "tmdb");
    }

    #[tokio::test]
    async fn test_empty_id_is_rejected_without_request() {
        let provider = create_test_provider();
        let result = provider.movie_details(" ").await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_an_error() {
        let provider = TmdbProvider::new("k".to_string(), "http://127.0.0.1:9".to_string());
        assert!(provider.tv_details("1396").await.is_err());
    }
}
