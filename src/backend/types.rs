//! Records exchanged with the catalog API

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// A movie as returned by the catalog API
///
/// Only `id` is relied upon for identity; everything else is display data
/// and tolerated when missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub sub_title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub runtime: u32,
    #[serde(default)]
    pub poster_img_url: String,
}

impl Movie {
    /// One-line summary: `2021-09-01 / Action, Drama / 132 min`
    pub fn summary(&self) -> String {
        format!(
            "{} / {} / {} min",
            self.release_date,
            self.genres.join(", "),
            self.runtime
        )
    }
}

/// A review attached to a movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: u64,
    pub movie_id: u64,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Creation date in local time, e.g. `2024. 3. 7.`
    pub fn created_date(&self) -> String {
        self.created_at
            .with_timezone(&Local)
            .format("%Y. %-m. %-d.")
            .to_string()
    }
}

/// Body of `POST /review`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub movie_id: u64,
    pub content: String,
    pub author: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_movie_tolerates_missing_fields() {
        let movie: Movie = serde_json::from_str(r#"{"id": 7, "title": "Heat"}"#).unwrap();
        assert_eq!(movie.id, 7);
        assert_eq!(movie.title, "Heat");
        assert!(movie.genres.is_empty());
    }

    #[test]
    fn test_movie_summary() {
        let movie: Movie = serde_json::from_value(serde_json::json!({
            "id": 1,
            "title": "The Matrix",
            "releaseDate": "1999-03-31",
            "genres": ["Action", "SF"],
            "runtime": 136
        }))
        .unwrap();
        assert_eq!(movie.summary(), "1999-03-31 / Action, SF / 136 min");
    }

    #[test]
    fn test_new_review_uses_camel_case() {
        let body = serde_json::to_value(NewReview {
            movie_id: 3,
            content: "Great".to_string(),
            author: "kim".to_string(),
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"movieId": 3, "content": "Great", "author": "kim"})
        );
    }

    #[test]
    fn test_review_parses_iso_timestamp() {
        let review: Review = serde_json::from_str(
            r#"{"id":1,"movieId":2,"author":"lee","content":"ok","createdAt":"2024-03-07T12:00:00.000Z"}"#,
        )
        .unwrap();
        assert_eq!(review.movie_id, 2);
        assert!(review.created_date().starts_with("2024. 3."));
    }
}
