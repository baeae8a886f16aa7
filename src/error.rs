/// Storage-level errors raised by key-value backends and the JSON adapter
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage quota exceeded: {needed} bytes needed, {available} available")]
    QuotaExceeded { needed: usize, available: usize },

    #[error("Corrupted value under key {0}")]
    Corrupted(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Invalid identity: {0}")]
    InvalidIdentity(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Timed out after {0:?}")]
    Timeout(std::time::Duration),
}

pub type AppResult<T> = Result<T, AppError>;

/// Failure reported by an analytics sink; always swallowed by callers
#[derive(thiserror::Error, Debug)]
pub enum AnalyticsError {
    #[error("Analytics sink rejected event {event}: {reason}")]
    Rejected { event: String, reason: String },

    #[error("Analytics sink unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_converts_into_app_error() {
        let err: AppError = StoreError::Unavailable("locked".to_string()).into();
        assert!(matches!(err, AppError::Store(StoreError::Unavailable(_))));
        assert_eq!(err.to_string(), "Storage error: Storage unavailable: locked");
    }

    #[test]
    fn test_quota_exceeded_message() {
        let err = StoreError::QuotaExceeded {
            needed: 120,
            available: 64,
        };
        assert_eq!(
            err.to_string(),
            "Storage quota exceeded: 120 bytes needed, 64 available"
        );
    }
}
