//! HTTP transport.

use std::time::Duration;

use ureq::Agent;

use crate::error::FetchError;

/// Performs GET requests relative to the API base URL.
pub trait Transport: Send + Sync {
    /// Fetch `path` (including any query string) and return the body.
    ///
    /// Non-2xx responses must be reported as [`FetchError::Status`].
    fn get(&self, path: &str) -> Result<String, FetchError>;
}

/// [`Transport`] backed by a `ureq` agent.
pub struct HttpTransport {
    agent: Agent,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for `base_url` (e.g. `http://host/api/documentation`).
    ///
    /// `timeout` of `None` keeps the agent's default.
    #[must_use]
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(timeout)
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }
}

impl Transport for HttpTransport {
    fn get(&self, path: &str) -> Result<String, FetchError> {
        let url = format!("{}{path}", self.base_url);
        tracing::info!(url = %url, "GET");

        let response = self
            .agent
            .get(&url)
            .header("Accept", "application/json")
            .call()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url,
            });
        }

        Ok(response.into_body().read_to_string()?)
    }
}
