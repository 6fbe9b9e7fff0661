//! Movie detail, review list and review editor state

use std::collections::HashMap;

use crate::backend::api::FetchError;
use crate::backend::types::{Movie, NewReview, Review};

pub const MOVIE_ERROR_MESSAGE: &str = "Something went wrong while loading the movie...";
pub const REVIEWS_ERROR_MESSAGE: &str = "Something went wrong while loading reviews...";
pub const REVIEW_SUBMIT_ERROR_MESSAGE: &str = "Failed to save the review. Please try again.";

/// Movie records already fetched this session
///
/// Catalog entries do not change while the app runs, so entries never expire.
#[derive(Debug, Default)]
pub struct DetailCache {
    movies: HashMap<u64, Movie>,
}

impl DetailCache {
    pub fn get(&self, id: u64) -> Option<&Movie> {
        self.movies.get(&id)
    }

    pub fn insert(&mut self, movie: Movie) {
        self.movies.insert(movie.id, movie);
    }

    /// Seed from a full listing (e.g. the startup `/movie` fetch)
    pub fn extend(&mut self, movies: &[Movie]) {
        for movie in movies {
            self.movies.entry(movie.id).or_insert_with(|| movie.clone());
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Loaded(Movie),
    NotFound,
    Failed,
}

impl From<Result<Movie, FetchError>> for DetailState {
    fn from(result: Result<Movie, FetchError>) -> Self {
        match result {
            Ok(movie) => DetailState::Loaded(movie),
            Err(FetchError::NotFound) => DetailState::NotFound,
            Err(e) => {
                tracing::error!("Failed to load movie: {}", e);
                DetailState::Failed
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReviewsState {
    Loading,
    Loaded(Vec<Review>),
    Failed,
}

impl From<Result<Vec<Review>, FetchError>> for ReviewsState {
    fn from(result: Result<Vec<Review>, FetchError>) -> Self {
        match result {
            Ok(reviews) => ReviewsState::Loaded(reviews),
            Err(e) => {
                tracing::error!("Failed to load reviews: {}", e);
                ReviewsState::Failed
            }
        }
    }
}

/// Author/content form under a movie
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewEditor {
    pub author: String,
    pub content: String,
    pending: bool,
    error: Option<&'static str>,
    pub(crate) generation: u64,
}

impl ReviewEditor {
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    /// Empty the form for another page.
    ///
    /// The generation keeps counting so answers to earlier submissions
    /// no longer match.
    pub fn reset(&mut self) {
        *self = Self {
            generation: self.generation + 1,
            ..Self::default()
        };
    }

    /// Build the request body and mark the form pending.
    ///
    /// Returns the generation to hand back to `finish_submit`.
    /// `None` while a submission is in flight or either field is blank.
    pub fn begin_submit(&mut self, movie_id: u64) -> Option<(u64, NewReview)> {
        if self.pending || self.author.trim().is_empty() || self.content.trim().is_empty() {
            return None;
        }
        self.generation += 1;
        self.pending = true;
        self.error = None;
        let body = NewReview {
            movie_id,
            content: self.content.clone(),
            author: self.author.clone(),
        };
        Some((self.generation, body))
    }

    /// Apply the server's answer; returns true when the list should reload.
    ///
    /// Answers for any generation but the latest leave the form untouched.
    pub fn finish_submit(&mut self, generation: u64, result: Result<(), FetchError>) -> bool {
        if generation != self.generation || !self.pending {
            tracing::debug!("Ignoring review answer for generation {}", generation);
            return false;
        }
        self.pending = false;
        match result {
            Ok(()) => {
                self.author.clear();
                self.content.clear();
                true
            }
            Err(e) => {
                tracing::warn!("Review submission failed: {}", e);
                self.error = Some(REVIEW_SUBMIT_ERROR_MESSAGE);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn movie(id: u64, title: &str) -> Movie {
        serde_json::from_value(serde_json::json!({ "id": id, "title": title })).unwrap()
    }

    #[test]
    fn test_detail_state_from_result() {
        assert_eq!(
            DetailState::from(Ok(movie(1, "Heat"))),
            DetailState::Loaded(movie(1, "Heat"))
        );
        assert_eq!(DetailState::from(Err(FetchError::NotFound)), DetailState::NotFound);
        assert_eq!(
            DetailState::from(Err(FetchError::Status(503))),
            DetailState::Failed
        );
    }

    #[test]
    fn test_cache_extend_keeps_existing_entries() {
        let mut cache = DetailCache::default();
        cache.insert(movie(1, "Detailed"));
        cache.extend(&[movie(1, "Listing"), movie(2, "Other")]);

        assert_eq!(cache.get(1).map(|m| m.title.as_str()), Some("Detailed"));
        assert!(cache.get(2).is_some());
        assert!(cache.get(3).is_none());
    }

    #[test]
    fn test_blank_review_not_submitted() {
        let mut editor = ReviewEditor {
            author: "kim".to_string(),
            content: "   ".to_string(),
            ..Default::default()
        };
        assert_eq!(editor.begin_submit(1), None);
        assert!(!editor.is_pending());
    }

    #[test]
    fn test_review_submit_lifecycle() {
        let mut editor = ReviewEditor {
            author: "kim".to_string(),
            content: "Great pacing".to_string(),
            ..Default::default()
        };

        let (generation, body) = editor.begin_submit(7).unwrap();
        assert_eq!(body.movie_id, 7);
        assert_eq!(body.author, "kim");
        assert!(editor.is_pending());
        assert_eq!(editor.begin_submit(7), None);

        assert!(editor.finish_submit(generation, Ok(())));
        assert!(editor.author.is_empty());
        assert!(editor.content.is_empty());
        assert!(!editor.is_pending());
        assert_eq!(editor.error(), None);
    }

    #[test]
    fn test_failed_review_keeps_draft() {
        let mut editor = ReviewEditor {
            author: "kim".to_string(),
            content: "Great pacing".to_string(),
            ..Default::default()
        };
        let (generation, _) = editor.begin_submit(7).unwrap();

        assert!(!editor.finish_submit(generation, Err(FetchError::Status(500))));
        assert_eq!(editor.content, "Great pacing");
        assert_eq!(editor.error(), Some(REVIEW_SUBMIT_ERROR_MESSAGE));
        assert!(editor.begin_submit(7).is_some());
    }

    #[test]
    fn test_answer_from_before_reset_is_ignored() {
        let mut editor = ReviewEditor {
            author: "kim".to_string(),
            content: "Great pacing".to_string(),
            ..Default::default()
        };
        let (old, _) = editor.begin_submit(7).unwrap();

        editor.reset();
        editor.author = "lee".to_string();
        editor.content = "Second draft".to_string();

        assert!(!editor.finish_submit(old, Err(FetchError::Status(500))));
        assert!(!editor.finish_submit(old, Ok(())));
        assert_eq!(editor.content, "Second draft");
        assert_eq!(editor.error(), None);

        let (current, _) = editor.begin_submit(7).unwrap();
        assert_ne!(current, old);
        assert!(editor.is_pending());
        assert!(!editor.finish_submit(old, Ok(())));
        assert!(editor.is_pending());
        assert!(editor.finish_submit(current, Ok(())));
    }
}
