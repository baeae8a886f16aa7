use serde::{Deserialize, Serialize};

/// Metadata returned by the content provider for a movie or show
///
/// TV payloads use `name` and `first_air_date`; both are folded into the
/// movie-shaped fields. Anything else the provider sends is kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentDetails {
    #[serde(default, alias = "name")]
    pub title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default, alias = "first_air_date")]
    pub release_date: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_payload_deserialization() {
        let json = r#"{
            "id": 27205,
            "title": "Inception",
            "overview": "A thief who steals corporate secrets",
            "poster_path": "/inception.jpg",
            "backdrop_path": null,
            "genres": [{"id": 28, "name": "Action"}],
            "vote_average": 8.4,
            "release_date": "2010-07-15",
            "runtime": 148
        }"#;

        let details: ContentDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.title.as_deref(), Some("Inception"));
        assert_eq!(details.poster_path.as_deref(), Some("/inception.jpg"));
        assert_eq!(details.backdrop_path, None);
        assert_eq!(details.genres[0].name, "Action");
        assert_eq!(details.vote_average, Some(8.4));
        assert_eq!(details.release_date.as_deref(), Some("2010-07-15"));
        assert_eq!(details.extra["runtime"], 148);
        assert_eq!(details.extra["id"], 27205);
    }

    #[test]
    fn test_tv_payload_uses_name_and_first_air_date() {
        let json = r#"{
            "name": "Breaking Bad",
            "first_air_date": "2008-01-20",
            "number_of_seasons": 5
        }"#;

        let details: ContentDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.title.as_deref(), Some("Breaking Bad"));
        assert_eq!(details.release_date.as_deref(), Some("2008-01-20"));
        assert!(details.genres.is_empty());
        assert_eq!(details.extra["number_of_seasons"], 5);
    }
}
