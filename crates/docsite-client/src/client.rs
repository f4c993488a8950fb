//! Cached documentation client.

use std::sync::Arc;
use std::time::Duration;

use docsite_catalog::{Category, SearchResults, SectionContent};
use docsite_query::{Clock, QueryCache, QueryOptions, QueryState, SystemClock};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::de::DeserializeOwned;

use crate::error::FetchError;
use crate::transport::{HttpTransport, Transport};

/// Characters left unescaped in ids and queries (RFC 3986 unreserved).
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Searches run only for queries longer than this many characters.
const MIN_SEARCH_CHARS: usize = 2;

/// Identity of a cached query: kind plus parameters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// `GET /categories`.
    Categories,
    /// `GET /section/:id`.
    Section(String),
    /// `GET /search?q=`.
    Search(String),
}

/// Staleness windows per query kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StaleTimes {
    /// Category listing.
    pub categories: Duration,
    /// Single section content.
    pub section: Duration,
    /// Search results.
    pub search: Duration,
}

impl Default for StaleTimes {
    fn default() -> Self {
        Self {
            categories: Duration::from_secs(5 * 60),
            section: Duration::from_secs(10 * 60),
            search: Duration::from_secs(2 * 60),
        }
    }
}

/// Client settings.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// API base URL, e.g. `http://127.0.0.1:7878/api/documentation`.
    pub base_url: String,
    /// Request timeout (`None` keeps the transport default).
    pub timeout: Option<Duration>,
    /// Staleness windows.
    pub stale_times: StaleTimes,
}

/// Documentation API client with a per-query cache.
///
/// Every operation returns a [`QueryState`]: the value, the error of the last
/// failed request, and whether a request is in flight. Results live only as
/// long as the client.
pub struct DocsClient {
    transport: Arc<dyn Transport>,
    stale_times: StaleTimes,
    categories: QueryCache<QueryKey, Vec<Category>, FetchError>,
    sections: QueryCache<QueryKey, SectionContent, FetchError>,
    searches: QueryCache<QueryKey, SearchResults, FetchError>,
}

impl DocsClient {
    /// Create a client talking HTTP to `config.base_url`.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        let transport = HttpTransport::new(&config.base_url, config.timeout);
        Self::with_transport(Arc::new(transport), config.stale_times)
    }

    /// Create a client over a custom transport.
    #[must_use]
    pub fn with_transport(transport: Arc<dyn Transport>, stale_times: StaleTimes) -> Self {
        Self::with_clock(transport, stale_times, Arc::new(SystemClock))
    }

    /// Create a client over a custom transport and clock.
    #[must_use]
    pub fn with_clock(
        transport: Arc<dyn Transport>,
        stale_times: StaleTimes,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            transport,
            stale_times,
            categories: QueryCache::with_clock(Arc::clone(&clock)),
            sections: QueryCache::with_clock(Arc::clone(&clock)),
            searches: QueryCache::with_clock(clock),
        }
    }

    /// Category listing, cached for `stale_times.categories`.
    pub fn categories(&self) -> QueryState<Vec<Category>, FetchError> {
        let options = QueryOptions::new(self.stale_times.categories);
        self.categories.fetch(QueryKey::Categories, options, || {
            self.request_categories()
        })
    }

    /// Content of one section, cached per id for `stale_times.section`.
    ///
    /// An empty id disables the query: no request is made and the state is
    /// idle.
    pub fn section(&self, id: &str) -> QueryState<SectionContent, FetchError> {
        let options = QueryOptions::new(self.stale_times.section).enabled(!id.is_empty());
        self.sections
            .fetch(QueryKey::Section(id.to_owned()), options, || {
                self.request_section(id)
            })
    }

    /// Search results, cached per query string for `stale_times.search`.
    ///
    /// Queries of two characters or fewer are disabled.
    pub fn search(&self, query: &str) -> QueryState<SearchResults, FetchError> {
        let enabled = query.chars().count() > MIN_SEARCH_CHARS;
        let options = QueryOptions::new(self.stale_times.search).enabled(enabled);
        self.searches
            .fetch(QueryKey::Search(query.to_owned()), options, || {
                self.request_search(query)
            })
    }

    /// Cached category listing without fetching.
    ///
    /// Reports `is_loading` while a [`DocsClient::categories`] call is in
    /// flight on another thread.
    pub fn cached_categories(&self) -> QueryState<Vec<Category>, FetchError> {
        self.categories.get(&QueryKey::Categories)
    }

    /// Cached content of one section without fetching.
    pub fn cached_section(&self, id: &str) -> QueryState<SectionContent, FetchError> {
        self.sections.get(&QueryKey::Section(id.to_owned()))
    }

    /// `GET /categories`, uncached.
    pub fn request_categories(&self) -> Result<Vec<Category>, FetchError> {
        self.get_json("/categories")
    }

    /// `GET /section/:id`, uncached.
    ///
    /// Fails with [`FetchError::MissingId`] for an empty id.
    pub fn request_section(&self, id: &str) -> Result<SectionContent, FetchError> {
        if id.is_empty() {
            return Err(FetchError::MissingId);
        }
        self.get_json(&format!("/section/{}", encode(id)))
    }

    /// `GET /search?q=`, uncached.
    pub fn request_search(&self, query: &str) -> Result<SearchResults, FetchError> {
        self.get_json(&format!("/search?q={}", encode(query)))
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let body = self.transport.get(path).inspect_err(|err| {
            tracing::warn!(path, error = %err, "Documentation request failed");
        })?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Percent-encode a path segment or query value.
fn encode(value: &str) -> String {
    utf8_percent_encode(value, UNRESERVED).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTransport;
    use docsite_catalog::{Catalog, Section};
    use docsite_query::ManualClock;
    use pretty_assertions::assert_eq;

    fn client(transport: &Arc<MockTransport>) -> (DocsClient, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let client = DocsClient::with_clock(
            Arc::clone(transport) as Arc<dyn Transport>,
            StaleTimes::default(),
            Arc::clone(&clock) as Arc<dyn Clock>,
        );
        (client, clock)
    }

    fn minutes(n: u64) -> Duration {
        Duration::from_secs(n * 60)
    }

    #[test]
    fn test_categories_cached_for_five_minutes() {
        let categories = Catalog::builtin().into_categories();
        let transport = Arc::new(MockTransport::new().with_json("/categories", &categories));
        let (client, clock) = client(&transport);

        let first = client.categories();
        clock.advance(minutes(4));
        let second = client.categories();

        assert_eq!(first.data.as_ref(), Some(&categories));
        assert_eq!(second.data, first.data);
        assert_eq!(transport.request_count("/categories"), 1);

        clock.advance(minutes(2));
        client.categories();
        assert_eq!(transport.request_count("/categories"), 2);
    }

    #[test]
    fn test_section_cached_per_id() {
        let transport = Arc::new(
            MockTransport::new()
                .with_json(
                    "/section/installation",
                    &SectionContent {
                        id: "installation".to_owned(),
                        content: "Install it".to_owned(),
                    },
                )
                .with_json(
                    "/section/quick-start",
                    &SectionContent {
                        id: "quick-start".to_owned(),
                        content: "Start it".to_owned(),
                    },
                ),
        );
        let (client, clock) = client(&transport);

        let first = client.section("installation");
        clock.advance(minutes(9));
        let again = client.section("installation");
        let other = client.section("quick-start");

        assert_eq!(first, again);
        assert_eq!(first.data.unwrap().content, "Install it");
        assert_eq!(other.data.unwrap().content, "Start it");
        assert_eq!(transport.request_count("/section/installation"), 1);

        clock.advance(minutes(2));
        client.section("installation");
        assert_eq!(transport.request_count("/section/installation"), 2);
    }

    #[test]
    fn test_cached_reads_never_fetch() {
        let content = SectionContent {
            id: "installation".to_owned(),
            content: "Install it".to_owned(),
        };
        let transport = Arc::new(MockTransport::new().with_json("/section/installation", &content));
        let (client, _clock) = client(&transport);

        assert!(client.cached_section("installation").is_idle());
        assert!(client.cached_categories().is_idle());
        assert!(transport.requests().is_empty());

        client.section("installation");
        assert_eq!(client.cached_section("installation").data, Some(content));
        assert_eq!(transport.request_count("/section/installation"), 1);
    }

    #[test]
    fn test_section_with_empty_id_is_disabled() {
        let transport = Arc::new(MockTransport::new());
        let (client, _clock) = client(&transport);

        let state = client.section("");

        assert!(state.is_idle());
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn test_request_section_requires_id() {
        let transport = Arc::new(MockTransport::new());
        let (client, _clock) = client(&transport);

        assert_eq!(client.request_section(""), Err(FetchError::MissingId));
    }

    #[test]
    fn test_section_not_found_is_error() {
        let transport = Arc::new(MockTransport::new().with_status("/section/missing", 404));
        let (client, _clock) = client(&transport);

        let state = client.section("missing");

        assert_eq!(state.data, None);
        assert!(matches!(
            state.error,
            Some(FetchError::Status { status: 404, .. })
        ));
    }

    #[test]
    fn test_failed_request_is_not_retried_automatically() {
        let transport = Arc::new(MockTransport::new().with_status("/categories", 500));
        let (client, _clock) = client(&transport);

        let state = client.categories();

        assert!(state.is_error());
        assert_eq!(transport.request_count("/categories"), 1);
    }

    #[test]
    fn test_search_requires_more_than_two_chars() {
        let results = SearchResults {
            results: vec![Section::new("api", "API", "Endpoints")],
        };
        let transport = Arc::new(MockTransport::new().with_json("/search?q=abc", &results));
        let (client, _clock) = client(&transport);

        assert!(client.search("ab").is_idle());
        assert!(transport.requests().is_empty());

        let state = client.search("abc");
        assert_eq!(state.data, Some(results));
        assert_eq!(transport.requests(), vec!["/search?q=abc".to_owned()]);
    }

    #[test]
    fn test_search_cached_for_two_minutes() {
        let transport = Arc::new(
            MockTransport::new().with_json("/search?q=plugin", &SearchResults::default()),
        );
        let (client, clock) = client(&transport);

        client.search("plugin");
        clock.advance(Duration::from_secs(119));
        client.search("plugin");
        assert_eq!(transport.request_count("/search?q=plugin"), 1);

        clock.advance(Duration::from_secs(1));
        client.search("plugin");
        assert_eq!(transport.request_count("/search?q=plugin"), 2);
    }

    #[test]
    fn test_query_and_id_are_percent_encoded() {
        let transport = Arc::new(MockTransport::new());
        let (client, _clock) = client(&transport);

        client.search("build pipeline");
        client.section("a/b");

        assert_eq!(
            transport.requests(),
            vec![
                "/search?q=build%20pipeline".to_owned(),
                "/section/a%2Fb".to_owned()
            ]
        );
    }

    #[test]
    fn test_invalid_json_is_decode_error() {
        let transport = Arc::new(MockTransport::new().with_json("/categories", &"not a list"));
        let (client, _clock) = client(&transport);

        let state = client.categories();

        assert!(matches!(state.error, Some(FetchError::Decode(_))));
    }
}
