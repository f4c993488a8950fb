//! Fetch error type.

/// Failure of a documentation request.
///
/// The `Display` output is the human-readable message surfaced to views.
/// `Clone` so it can be stored in the query cache and handed to every
/// caller that joined the same request.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Server answered with a non-success status.
    #[error("HTTP {status} for {url}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// Request could not be sent or the response could not be read.
    #[error("network error: {0}")]
    Network(String),

    /// Response body is not the expected JSON.
    #[error("invalid response: {0}")]
    Decode(String),

    /// Section request made without an id.
    #[error("section id is required")]
    MissingId,
}

impl From<ureq::Error> for FetchError {
    fn from(err: ureq::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
