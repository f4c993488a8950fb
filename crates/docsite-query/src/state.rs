//! Snapshot of a single query.

use std::time::Instant;

/// Observable state of a query: last data, last error, loading flag.
///
/// `data` and `error` can both be set when a refetch failed after an earlier
/// success; consumers decide which takes priority.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryState<T, E> {
    /// Last successfully fetched value.
    pub data: Option<T>,
    /// Error from the most recent fetch, cleared by the next success.
    pub error: Option<E>,
    /// Whether a fetch for this key is in flight.
    pub is_loading: bool,
    /// When `data` was fetched.
    pub updated_at: Option<Instant>,
}

impl<T, E> QueryState<T, E> {
    /// State of a query that is disabled or has never run.
    #[must_use]
    pub fn idle() -> Self {
        Self {
            data: None,
            error: None,
            is_loading: false,
            updated_at: None,
        }
    }

    /// State holding data that needs no fetching.
    #[must_use]
    pub fn ready(data: T, updated_at: Instant) -> Self {
        Self {
            data: Some(data),
            error: None,
            is_loading: false,
            updated_at: Some(updated_at),
        }
    }

    /// Whether the query holds neither data nor error and is not loading.
    pub fn is_idle(&self) -> bool {
        self.data.is_none() && self.error.is_none() && !self.is_loading
    }

    /// Whether the last fetch failed.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

impl<T, E> Default for QueryState<T, E> {
    fn default() -> Self {
        Self::idle()
    }
}
