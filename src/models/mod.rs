use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt::Display, str::FromStr};

use crate::error::AppError;

pub mod details;
pub mod trending;

pub use details::{ContentDetails, Genre};
pub use trending::{EnrichedContent, GlobalStats, RecentActivity, TimeWindow, TrendingScope};

/// Caller-supplied context merged into a record (genre hints, source page, ...)
pub type MetadataBag = serde_json::Map<String, serde_json::Value>;

/// Every record keyed by its identity's storage key
pub type InteractionTable = BTreeMap<String, InteractionRecord>;

// ============================================================================
// Content identity
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Movie,
    Tv,
    Anime,
}

impl ContentType {
    pub const ALL: [ContentType; 3] = [ContentType::Movie, ContentType::Tv, ContentType::Anime];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Movie => "movie",
            ContentType::Tv => "tv",
            ContentType::Anime => "anime",
        }
    }
}

impl Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "movie" => Ok(ContentType::Movie),
            "tv" => Ok(ContentType::Tv),
            "anime" => Ok(ContentType::Anime),
            other => Err(AppError::InvalidInput(format!(
                "Unknown content type: {other}. Valid values are: movie, tv, anime"
            ))),
        }
    }
}

/// Composite key for all interaction data
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentIdentity {
    pub content_id: String,
    pub content_type: ContentType,
}

impl ContentIdentity {
    /// Creates a validated identity
    pub fn new(content_id: impl Into<String>, content_type: ContentType) -> Result<Self, AppError> {
        let identity = Self {
            content_id: content_id.into(),
            content_type,
        };
        identity.validate()?;
        Ok(identity)
    }

    /// Rejects identities that would produce a malformed storage key
    pub fn validate(&self) -> Result<(), AppError> {
        if self.content_id.trim().is_empty() {
            return Err(AppError::InvalidIdentity(
                "content id cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Key of this identity inside the interaction table
    pub fn storage_key(&self) -> String {
        format!("{}_{}", self.content_type, self.content_id)
    }
}

impl Display for ContentIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.content_type, self.content_id)
    }
}

// ============================================================================
// Interactions
// ============================================================================

/// A typed user interaction. Unknown kinds are kept verbatim and weigh 1.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InteractionKind {
    View,
    Play,
    Complete,
    Bookmark,
    Watchlist,
    Share,
    Comment,
    Rating,
    Other(String),
}

impl InteractionKind {
    /// Score contribution of a single interaction of this kind
    pub fn weight(&self) -> u64 {
        match self {
            InteractionKind::View => 1,
            InteractionKind::Play => 3,
            InteractionKind::Complete => 5,
            InteractionKind::Bookmark => 2,
            InteractionKind::Watchlist => 2,
            InteractionKind::Share => 4,
            InteractionKind::Comment => 3,
            InteractionKind::Rating => 2,
            InteractionKind::Other(_) => 1,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            InteractionKind::View => "view",
            InteractionKind::Play => "play",
            InteractionKind::Complete => "complete",
            InteractionKind::Bookmark => "bookmark",
            InteractionKind::Watchlist => "watchlist",
            InteractionKind::Share => "share",
            InteractionKind::Comment => "comment",
            InteractionKind::Rating => "rating",
            InteractionKind::Other(name) => name,
        }
    }
}

impl From<&str> for InteractionKind {
    fn from(value: &str) -> Self {
        match value {
            "view" => InteractionKind::View,
            "play" => InteractionKind::Play,
            "complete" => InteractionKind::Complete,
            "bookmark" => InteractionKind::Bookmark,
            "watchlist" => InteractionKind::Watchlist,
            "share" => InteractionKind::Share,
            "comment" => InteractionKind::Comment,
            "rating" => InteractionKind::Rating,
            other => InteractionKind::Other(other.to_string()),
        }
    }
}

impl From<String> for InteractionKind {
    fn from(value: String) -> Self {
        InteractionKind::from(value.as_str())
    }
}

impl From<InteractionKind> for String {
    fn from(kind: InteractionKind) -> Self {
        kind.as_str().to_string()
    }
}

impl Display for InteractionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accumulated interactions for one piece of content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionRecord {
    pub content_id: String,
    pub content_type: ContentType,
    pub total_score: u64,
    #[serde(default)]
    pub interactions: BTreeMap<InteractionKind, u64>,
    pub first_interaction_at: DateTime<Utc>,
    pub last_interaction_at: DateTime<Utc>,
    #[serde(default)]
    pub unique_views: u64,
    #[serde(default)]
    pub metadata: MetadataBag,
}

impl InteractionRecord {
    /// Creates an empty record first seen at `now`
    pub fn new(identity: &ContentIdentity, now: DateTime<Utc>) -> Self {
        Self {
            content_id: identity.content_id.clone(),
            content_type: identity.content_type,
            total_score: 0,
            interactions: BTreeMap::new(),
            first_interaction_at: now,
            last_interaction_at: now,
            unique_views: 0,
            metadata: MetadataBag::new(),
        }
    }

    pub fn identity(&self) -> ContentIdentity {
        ContentIdentity {
            content_id: self.content_id.clone(),
            content_type: self.content_type,
        }
    }

    /// Counts one interaction of `kind` and shallow-merges `metadata`
    pub fn apply(&mut self, kind: &InteractionKind, metadata: Option<MetadataBag>, now: DateTime<Utc>) {
        *self.interactions.entry(kind.clone()).or_insert(0) += 1;
        self.total_score += kind.weight();
        // Clock skew must never move the last interaction before the first.
        self.last_interaction_at = now.max(self.first_interaction_at);

        if *kind == InteractionKind::View {
            self.unique_views += 1;
        }

        if let Some(metadata) = metadata {
            self.metadata.extend(metadata);
        }
    }

    /// Raw number of interactions across all kinds
    pub fn interaction_count(&self) -> u64 {
        self.interactions.values().sum()
    }

    /// Score derived from the counters alone; equals `total_score` for any untampered record
    pub fn weighted_score(&self) -> u64 {
        self.interactions
            .iter()
            .map(|(kind, count)| kind.weight() * count)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    fn identity() -> ContentIdentity {
        ContentIdentity::new("42", ContentType::Movie).unwrap()
    }

    #[test]
    fn test_identity_storage_key() {
        assert_eq!(identity().storage_key(), "movie_42");
        let anime = ContentIdentity::new("9", ContentType::Anime).unwrap();
        assert_eq!(anime.storage_key(), "anime_9");
        assert_eq!(format!("{}", anime), "anime_9");
    }

    #[test]
    fn test_identity_rejects_blank_id() {
        let result = ContentIdentity::new("   ", ContentType::Tv);
        assert!(matches!(result, Err(AppError::InvalidIdentity(_))));
    }

    #[test]
    fn test_content_type_from_str() {
        assert_eq!("movie".parse::<ContentType>().unwrap(), ContentType::Movie);
        assert_eq!(" TV ".parse::<ContentType>().unwrap(), ContentType::Tv);
        assert!("podcast".parse::<ContentType>().is_err());
    }

    #[test]
    fn test_kind_weights() {
        let expected = [
            ("view", 1),
            ("play", 3),
            ("complete", 5),
            ("bookmark", 2),
            ("watchlist", 2),
            ("share", 4),
            ("comment", 3),
            ("rating", 2),
            ("download", 1),
        ];
        for (name, weight) in expected {
            assert_eq!(InteractionKind::from(name).weight(), weight, "{name}");
        }
    }

    #[test]
    fn test_unknown_kind_survives_serialization() {
        let kind = InteractionKind::from("download");
        assert_eq!(kind, InteractionKind::Other("download".to_string()));
        assert_eq!(serde_json::to_string(&kind).unwrap(), r#""download""#);
        let parsed: InteractionKind = serde_json::from_str(r#""download""#).unwrap();
        assert_eq!(parsed, kind);
    }

    #[test]
    fn test_view_play_complete_scores_nine() {
        let now = Utc::now();
        let mut record = InteractionRecord::new(&identity(), now);
        record.apply(&InteractionKind::View, None, now);
        record.apply(&InteractionKind::Play, None, now);
        record.apply(&InteractionKind::Complete, None, now);

        assert_eq!(record.total_score, 9);
        assert_eq!(record.unique_views, 1);
        assert_eq!(record.interactions[&InteractionKind::View], 1);
        assert_eq!(record.interactions[&InteractionKind::Play], 1);
        assert_eq!(record.interactions[&InteractionKind::Complete], 1);
        assert_eq!(record.interaction_count(), 3);
        assert_eq!(record.weighted_score(), record.total_score);
    }

    #[test]
    fn test_apply_merges_metadata_shallowly() {
        let now = Utc::now();
        let mut record = InteractionRecord::new(&identity(), now);

        let first = json!({"genre": "drama", "source": "home"});
        record.apply(&InteractionKind::View, first.as_object().cloned(), now);
        let second = json!({"source": "search"});
        record.apply(&InteractionKind::Share, second.as_object().cloned(), now);

        assert_eq!(record.metadata["genre"], "drama");
        assert_eq!(record.metadata["source"], "search");
    }

    #[test]
    fn test_last_interaction_never_precedes_first() {
        let now = Utc::now();
        let mut record = InteractionRecord::new(&identity(), now);
        record.apply(&InteractionKind::Play, None, now - Duration::hours(1));

        assert!(record.last_interaction_at >= record.first_interaction_at);
    }

    #[test]
    fn test_record_json_shape() {
        let now = Utc::now();
        let mut record = InteractionRecord::new(&identity(), now);
        record.apply(&InteractionKind::Bookmark, None, now);

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["contentId"], "42");
        assert_eq!(value["contentType"], "movie");
        assert_eq!(value["totalScore"], 2);
        assert_eq!(value["interactions"]["bookmark"], 1);
        assert_eq!(value["uniqueViews"], 0);
        assert!(value["firstInteractionAt"].is_string());
    }
}
