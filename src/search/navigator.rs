//! Turns a confirmed search submission into a single navigation

use crate::history::{NavigationError, NavigationPort, Route};

/// Result of a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Blank draft or unchanged query; nothing happened
    Skipped,
    /// A search route for this query was pushed
    Navigated(String),
}

#[derive(Debug)]
pub struct SearchNavigator<P> {
    port: P,
}

impl<P: NavigationPort> SearchNavigator<P> {
    pub fn new(port: P) -> Self {
        Self { port }
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    /// The confirmed query as the port currently reports it
    pub fn current_query(&self) -> &str {
        self.port.current().query()
    }

    /// Submit `draft` against the current query.
    ///
    /// Rejection by the port is returned unchanged; nothing is retried.
    pub fn submit(&mut self, draft: &str) -> Result<Submission, NavigationError> {
        if draft.trim().is_empty() || draft == self.current_query() {
            return Ok(Submission::Skipped);
        }

        self.port.push(Route::search(draft))?;
        Ok(Submission::Navigated(draft.to_string()))
    }
}
