//! Search box, route query and result list synchronisation

pub mod fetcher;
pub mod navigator;
pub mod query_sync;

pub use fetcher::{FetchOutcome, FetchPlan, FetchTicket, ResultFetcher};
pub use navigator::{SearchNavigator, Submission};
pub use query_sync::QueryStateSync;
