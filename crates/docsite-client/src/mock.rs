//! Mock transport for testing.
//!
//! Provides [`MockTransport`] for exercising the client without a server.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::Serialize;

use crate::error::FetchError;
use crate::transport::Transport;

/// Canned response for a path.
#[derive(Clone, Debug)]
enum MockResponse {
    Body(String),
    Status(u16),
}

/// Mock transport serving canned responses and recording requests.
///
/// Paths without a configured response answer with HTTP 404.
///
/// # Example
///
/// ```ignore
/// use docsite_client::MockTransport;
///
/// let transport = MockTransport::new()
///     .with_json("/section/intro", &serde_json::json!({"id": "intro", "content": "Hi"}))
///     .with_status("/section/missing", 404);
/// ```
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<HashMap<String, MockResponse>>,
    requests: Mutex<Vec<String>>,
}

impl MockTransport {
    /// Create a mock with no responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `value` as JSON for `path`.
    ///
    /// # Panics
    ///
    /// Panics if `value` cannot be serialized.
    #[must_use]
    pub fn with_json<T: Serialize + ?Sized>(self, path: impl Into<String>, value: &T) -> Self {
        let body = serde_json::to_string(value).unwrap();
        self.set_response(path.into(), MockResponse::Body(body));
        self
    }

    /// Answer `path` with an error status.
    #[must_use]
    pub fn with_status(self, path: impl Into<String>, status: u16) -> Self {
        self.set_response(path.into(), MockResponse::Status(status));
        self
    }

    /// All requested paths, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests made for `path`.
    pub fn request_count(&self, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|p| *p == path)
            .count()
    }

    fn set_response(&self, path: String, response: MockResponse) {
        self.responses.lock().unwrap().insert(path, response);
    }
}

impl Transport for MockTransport {
    fn get(&self, path: &str) -> Result<String, FetchError> {
        self.requests.lock().unwrap().push(path.to_owned());

        let response = self.responses.lock().unwrap().get(path).cloned();
        match response {
            Some(MockResponse::Body(body)) => Ok(body),
            Some(MockResponse::Status(status)) => Err(FetchError::Status {
                status,
                url: path.to_owned(),
            }),
            None => Err(FetchError::Status {
                status: 404,
                url: path.to_owned(),
            }),
        }
    }
}
