//! HTTP client for the catalog API

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::types::{Movie, NewReview, Review};
use crate::search::fetcher::SearchSource;

/// Errors produced by catalog requests
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("resource not found")]
    NotFound,
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unreadable response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

/// Client for the movie/review REST API
///
/// Cloning is cheap; clones share the underlying connection pool, so one can
/// be moved into every spawned request.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search movies by title
    pub async fn search_movies(&self, query: &str) -> Result<Vec<Movie>, FetchError> {
        let url = format!("{}/movie/search", self.base_url);
        let response = self.client.get(&url).query(&[("q", query)]).send().await?;
        Self::read_json(response).await
    }

    /// Every movie in the catalog
    pub async fn all_movies(&self) -> Result<Vec<Movie>, FetchError> {
        let url = format!("{}/movie", self.base_url);
        let response = self.client.get(&url).send().await?;
        Self::read_json(response).await
    }

    /// A single movie; 404 becomes [`FetchError::NotFound`]
    pub async fn movie(&self, id: u64) -> Result<Movie, FetchError> {
        let url = format!("{}/movie/{}", self.base_url, id);
        let response = self.client.get(&url).send().await?;
        Self::read_json(response).await
    }

    /// Reviews written for a movie
    pub async fn reviews(&self, movie_id: u64) -> Result<Vec<Review>, FetchError> {
        let url = format!("{}/review/movie/{}", self.base_url, movie_id);
        let response = self.client.get(&url).send().await?;
        Self::read_json(response).await
    }

    /// Submit a new review
    pub async fn create_review(&self, review: &NewReview) -> Result<(), FetchError> {
        let url = format!("{}/review", self.base_url);
        let response = self.client.post(&url).json(review).send().await?;
        Self::check_status(&response)?;
        Ok(())
    }

    /// Raw bytes of an image, used for posters
    pub async fn image_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(url).send().await?;
        Self::check_status(&response)?;
        Ok(response.bytes().await?.to_vec())
    }

    fn check_status(response: &Response) -> Result<(), FetchError> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else if status == StatusCode::NOT_FOUND {
            Err(FetchError::NotFound)
        } else {
            Err(FetchError::Status(status.as_u16()))
        }
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, FetchError> {
        Self::check_status(&response)?;
        response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

impl SearchSource for CatalogClient {
    async fn search(&self, query: &str) -> Result<Vec<Movie>, FetchError> {
        self.search_movies(query).await
    }
}
