//! In-app routes and navigation history
//!
//! The current route plays the part a browser URL would: it is the single
//! source of truth for the confirmed search query, read on every render and
//! written only through a [`NavigationPort`].

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;
use url::Url;

const APP_NAME: &str = "Hanip Cinema";

/// Base used only to parse relative paths
const PATH_BASE: &str = "cinema://app";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Search { q: String },
    Movie { id: u64 },
}

impl Route {
    pub fn search(q: impl Into<String>) -> Self {
        Route::Search { q: q.into() }
    }

    /// The confirmed search query carried by this route (empty if none)
    pub fn query(&self) -> &str {
        match self {
            Route::Search { q } => q,
            Route::Home | Route::Movie { .. } => "",
        }
    }

    /// Path form: `/`, `/search?q=...`, `/movie/<id>`
    pub fn to_path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Search { q } => {
                let query: String = url::form_urlencoded::Serializer::new(String::new())
                    .append_pair("q", q)
                    .finish();
                format!("/search?{}", query)
            }
            Route::Movie { id } => format!("/movie/{}", id),
        }
    }

    /// Inverse of [`Route::to_path`]; `None` for anything unrecognised
    pub fn parse(path: &str) -> Option<Self> {
        let url = Url::parse(PATH_BASE).ok()?.join(path).ok()?;
        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        match segments.as_slice() {
            [] => Some(Route::Home),
            ["search"] => {
                let q = url
                    .query_pairs()
                    .find(|(key, _)| key == "q")
                    .map(|(_, value)| value.into_owned())
                    .unwrap_or_default();
                Some(Route::Search { q })
            }
            ["movie", id] => id.parse().ok().map(|id| Route::Movie { id }),
            _ => None,
        }
    }

    /// Window title for this route; `movie_title` is used once known
    pub fn title(&self, movie_title: Option<&str>) -> String {
        match (self, movie_title) {
            (Route::Search { q }, _) => format!("Search results: {} | {}", q, APP_NAME),
            (Route::Movie { .. }, Some(title)) => format!("{} | {}", title, APP_NAME),
            _ => APP_NAME.to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("no movie with id {0}")]
    UnknownMovie(u64),
    #[error("navigation rejected: {0}")]
    Rejected(String),
}

/// Read/write access to the current route
pub trait NavigationPort {
    fn current(&self) -> &Route;

    /// Push a new entry; the previous one stays reachable via back
    fn push(&mut self, route: Route) -> Result<(), NavigationError>;
}

/// Back/forward history of visited routes
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Route>,
    index: usize,
    /// Movie ids that may be visited; `None` until enumerated
    known_movies: Option<HashSet<u64>>,
}

impl Default for History {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}

impl History {
    pub fn new(start: Route) -> Self {
        Self {
            entries: vec![start],
            index: 0,
            known_movies: None,
        }
    }

    /// Restrict movie routes to the given ids
    pub fn set_known_movies(&mut self, ids: impl IntoIterator<Item = u64>) {
        self.known_movies = Some(ids.into_iter().collect());
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Step back; returns the new current route if it changed
    pub fn back(&mut self) -> Option<&Route> {
        if !self.can_go_back() {
            return None;
        }
        self.index -= 1;
        Some(&self.entries[self.index])
    }

    /// Step forward; returns the new current route if it changed
    pub fn forward(&mut self) -> Option<&Route> {
        if !self.can_go_forward() {
            return None;
        }
        self.index += 1;
        Some(&self.entries[self.index])
    }

    /// Push the route for a path such as `/search?q=heat`
    pub fn push_path(&mut self, path: &str) -> Result<(), NavigationError> {
        let route = Route::parse(path)
            .ok_or_else(|| NavigationError::Rejected(format!("unrecognised path {:?}", path)))?;
        self.push(route)
    }
}

impl NavigationPort for History {
    fn current(&self) -> &Route {
        &self.entries[self.index]
    }

    fn push(&mut self, route: Route) -> Result<(), NavigationError> {
        if let (Route::Movie { id }, Some(known)) = (&route, &self.known_movies) {
            if !known.contains(id) {
                return Err(NavigationError::UnknownMovie(*id));
            }
        }

        tracing::info!("Navigating {} -> {}", self.current(), route);
        self.entries.truncate(self.index + 1);
        self.entries.push(route);
        self.index += 1;
        Ok(())
    }
}
