//! Client for the docsite documentation API.
//!
//! Wraps the three backend endpoints under `/api/documentation` in cached
//! queries:
//!
//! | Operation                   | Endpoint            | Stale after | Runs when        |
//! |-----------------------------|---------------------|-------------|------------------|
//! | [`DocsClient::categories`]  | `GET /categories`   | 5 minutes   | always           |
//! | [`DocsClient::section`]     | `GET /section/:id`  | 10 minutes  | id is non-empty  |
//! | [`DocsClient::search`]      | `GET /search?q=`    | 2 minutes   | query > 2 chars  |
//!
//! Any non-2xx response or transport failure becomes a [`FetchError`] stored
//! in the query state. Failed requests are not retried.
//!
//! The HTTP seam is the [`Transport`] trait. [`HttpTransport`] talks to a
//! real server; `MockTransport` (behind the `mock` feature) serves canned
//! responses in tests.

mod client;
mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod transport;

pub use client::{ClientConfig, DocsClient, QueryKey, StaleTimes};
pub use error::FetchError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockTransport;
pub use transport::{HttpTransport, Transport};
