//! Search result fetching with a session cache and last-query-wins delivery
//!
//! Requests are tagged with a [`FetchTicket`] when issued. Completions come
//! back through [`ResultFetcher::resolve`], which drops any ticket that is no
//! longer the most recent one, so a slow response for an old query can never
//! replace the results of a newer one.

use std::collections::HashMap;
use std::future::Future;

use crate::backend::api::FetchError;
use crate::backend::types::Movie;

/// Inline text shown when a search fails
pub const SEARCH_ERROR_MESSAGE: &str = "Something went wrong while searching...";

/// Anything that can answer a search query
pub trait SearchSource {
    fn search(&self, query: &str) -> impl Future<Output = Result<Vec<Movie>, FetchError>> + Send;
}

/// Displayable result of a search
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Success(Vec<Movie>),
    EmptyQuery,
    HttpError(u16),
    NetworkError,
}

impl FetchOutcome {
    /// Items to render; empty for everything but `Success`
    pub fn items(&self) -> &[Movie] {
        match self {
            FetchOutcome::Success(movies) => movies,
            _ => &[],
        }
    }

    /// Inline error text, if the outcome is a failure
    pub fn error_message(&self) -> Option<&'static str> {
        match self {
            FetchOutcome::HttpError(_) | FetchOutcome::NetworkError => Some(SEARCH_ERROR_MESSAGE),
            FetchOutcome::Success(_) | FetchOutcome::EmptyQuery => None,
        }
    }
}

impl From<Result<Vec<Movie>, FetchError>> for FetchOutcome {
    fn from(result: Result<Vec<Movie>, FetchError>) -> Self {
        match result {
            Ok(movies) => FetchOutcome::Success(movies),
            Err(FetchError::Status(status)) => FetchOutcome::HttpError(status),
            Err(FetchError::NotFound) => FetchOutcome::HttpError(404),
            // An unreadable body never produced a usable response.
            Err(FetchError::Transport(_)) | Err(FetchError::Decode(_)) => FetchOutcome::NetworkError,
        }
    }
}

/// Identity of one issued request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    query: String,
}

impl FetchTicket {
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// What the caller has to do for a query
#[derive(Debug, Clone, PartialEq)]
pub enum FetchPlan {
    /// Outcome known without touching the network
    Ready(FetchOutcome),
    /// Issue a request and hand the result back with this ticket
    Request(FetchTicket),
}

#[derive(Debug, Default)]
pub struct ResultFetcher {
    cache: HashMap<String, Vec<Movie>>,
    next_seq: u64,
    /// Sequence number of the latest activation; requests issued under an
    /// older one are stale.
    active_seq: u64,
}

impl ResultFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate `query` and decide how to obtain its outcome.
    ///
    /// Every call supersedes all earlier tickets, including calls answered
    /// from the cache or short-circuited on an empty query.
    pub fn begin(&mut self, query: &str) -> FetchPlan {
        self.next_seq += 1;
        self.active_seq = self.next_seq;

        if query.is_empty() {
            return FetchPlan::Ready(FetchOutcome::EmptyQuery);
        }

        if let Some(movies) = self.cache.get(query) {
            tracing::debug!("Search cache hit for {:?}", query);
            return FetchPlan::Ready(FetchOutcome::Success(movies.clone()));
        }

        FetchPlan::Request(FetchTicket {
            seq: self.active_seq,
            query: query.to_string(),
        })
    }

    /// Accept a completed request.
    ///
    /// Successful results are cached even when stale. Returns `None` when the
    /// ticket has been superseded and the result must not be shown.
    pub fn resolve(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Movie>, FetchError>,
    ) -> Option<FetchOutcome> {
        match &result {
            Ok(movies) => {
                self.cache
                    .entry(ticket.query.clone())
                    .or_insert_with(|| movies.clone());
            }
            Err(e) => tracing::warn!("Search for {:?} failed: {}", ticket.query, e),
        }

        if ticket.seq != self.active_seq {
            tracing::debug!("Discarding stale results for {:?}", ticket.query);
            return None;
        }

        Some(FetchOutcome::from(result))
    }

    /// Fetch `query` from `source` and return its outcome in one step
    pub async fn fetch<S: SearchSource>(&mut self, source: &S, query: &str) -> FetchOutcome {
        match self.begin(query) {
            FetchPlan::Ready(outcome) => outcome,
            FetchPlan::Request(ticket) => {
                let result = source.search(ticket.query()).await;
                // Nothing can supersede the ticket while we hold `&mut self`.
                self.resolve(ticket, result)
                    .unwrap_or(FetchOutcome::NetworkError)
            }
        }
    }

    #[cfg(test)]
    pub fn is_cached(&self, query: &str) -> bool {
        self.cache.contains_key(query)
    }
}
