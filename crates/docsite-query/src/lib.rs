//! Keyed query cache for docsite.
//!
//! Each query is identified by a key (query kind plus parameters). The cache
//! keeps the last fetched value, the last error, an in-flight flag and the
//! time of the last successful fetch for every key:
//!
//! - [`QueryCache::fetch`]: return fresh data, join a request already in
//!   flight for the same key, or run the fetcher once
//! - [`QueryCache::get`]: snapshot without fetching
//! - [`QueryCache::set`]: store a value directly
//! - [`QueryCache::invalidate_if_stale`]: drop data older than a window
//!
//! Time is read through a [`Clock`] so staleness can be tested without
//! sleeping.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use docsite_query::{QueryCache, QueryOptions};
//!
//! let cache: QueryCache<String, u32, String> = QueryCache::new();
//! let options = QueryOptions::new(Duration::from_secs(60));
//!
//! let state = cache.fetch("answer".to_owned(), options, || Ok(42));
//! assert_eq!(state.data, Some(42));
//!
//! // Served from cache: the fetcher is not called again
//! let state = cache.fetch("answer".to_owned(), options, || Ok(0));
//! assert_eq!(state.data, Some(42));
//! ```

mod cache;
mod clock;
mod state;

pub use cache::{QueryCache, QueryOptions};
pub use clock::{Clock, ManualClock, SystemClock};
pub use state::QueryState;
