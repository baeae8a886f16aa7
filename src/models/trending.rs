//! Trending windows, scopes and the enriched results handed back to callers.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, str::FromStr};

use super::{ContentDetails, ContentType, InteractionKind, InteractionRecord};
use crate::error::AppError;

/// Time window a trending list is computed over
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    Day,
    #[default]
    Week,
    Month,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 3] = [TimeWindow::Day, TimeWindow::Week, TimeWindow::Month];

    /// Length of the window
    pub fn duration(&self) -> Duration {
        match self {
            Self::Day => Duration::hours(24),
            Self::Week => Duration::days(7),
            Self::Month => Duration::days(30),
        }
    }

    /// Parses a window name, falling back to a week for anything unrecognized
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day => write!(f, "day"),
            Self::Week => write!(f, "week"),
            Self::Month => write!(f, "month"),
        }
    }
}

impl FromStr for TimeWindow {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            _ => Err(AppError::InvalidInput(format!(
                "Invalid window: {s}. Valid values are: day, week, month"
            ))),
        }
    }
}

/// Which content types a trending list covers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TrendingScope {
    #[default]
    All,
    Only(ContentType),
}

impl TrendingScope {
    pub fn matches(&self, content_type: ContentType) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == content_type,
        }
    }
}

impl From<ContentType> for TrendingScope {
    fn from(content_type: ContentType) -> Self {
        Self::Only(content_type)
    }
}

impl fmt::Display for TrendingScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Only(content_type) => write!(f, "{}", content_type),
        }
    }
}

impl FromStr for TrendingScope {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<ContentType>().map(Self::Only)
    }
}

/// A ranked trending entry, joined with provider metadata when available
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedContent {
    pub id: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub trending_score: u64,
    pub trending_interactions: BTreeMap<InteractionKind, u64>,
    pub unique_views: u64,
    pub last_interaction: DateTime<Utc>,
    /// `None` when the provider failed or timed out for this item
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ContentDetails>,
}

impl EnrichedContent {
    pub fn from_record(record: &InteractionRecord, details: Option<ContentDetails>) -> Self {
        Self {
            id: record.content_id.clone(),
            content_type: record.content_type,
            trending_score: record.total_score,
            trending_interactions: record.interactions.clone(),
            unique_views: record.unique_views,
            last_interaction: record.last_interaction_at,
            details,
        }
    }

    pub fn is_enriched(&self) -> bool {
        self.details.is_some()
    }
}

/// Aggregate view over every recorded interaction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStats {
    pub total_content: u64,
    pub total_interactions: u64,
    pub total_score: u64,
    pub by_content_type: BTreeMap<ContentType, u64>,
    pub by_interaction: BTreeMap<InteractionKind, u64>,
    pub recent_activity: RecentActivity,
}

/// Number of records touched within each trailing window
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivity {
    pub last_day: u64,
    pub last_week: u64,
    pub last_month: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_durations() {
        assert_eq!(TimeWindow::Day.duration(), Duration::hours(24));
        assert_eq!(TimeWindow::Week.duration(), Duration::days(7));
        assert_eq!(TimeWindow::Month.duration(), Duration::days(30));
    }

    #[test]
    fn test_unrecognized_window_defaults_to_week() {
        assert_eq!(TimeWindow::parse_or_default("day"), TimeWindow::Day);
        assert_eq!(TimeWindow::parse_or_default("fortnight"), TimeWindow::Week);
        assert!("fortnight".parse::<TimeWindow>().is_err());
    }

    #[test]
    fn test_scope_display_and_parse() {
        assert_eq!(TrendingScope::All.to_string(), "all");
        assert_eq!(TrendingScope::Only(ContentType::Tv).to_string(), "tv");
        assert_eq!("all".parse::<TrendingScope>().unwrap(), TrendingScope::All);
        assert_eq!(
            "anime".parse::<TrendingScope>().unwrap(),
            TrendingScope::Only(ContentType::Anime)
        );
    }

    #[test]
    fn test_scope_matches() {
        assert!(TrendingScope::All.matches(ContentType::Anime));
        assert!(TrendingScope::Only(ContentType::Movie).matches(ContentType::Movie));
        assert!(!TrendingScope::Only(ContentType::Movie).matches(ContentType::Tv));
    }

    #[test]
    fn test_stats_keys_serialize_as_names() {
        let mut stats = GlobalStats::default();
        stats.by_content_type.insert(ContentType::Movie, 2);
        stats.by_interaction.insert(InteractionKind::Play, 3);

        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["byContentType"]["movie"], 2);
        assert_eq!(value["byInteraction"]["play"], 3);
        assert_eq!(value["recentActivity"]["lastDay"], 0);
    }
}
