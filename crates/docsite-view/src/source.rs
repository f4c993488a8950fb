//! Data sources for the page shell.

use std::sync::Arc;
use std::time::Instant;

use docsite_catalog::{Catalog, Category, SectionContent};
use docsite_client::{DocsClient, FetchError};
use docsite_query::QueryState;

/// Where the page shell gets categories and section bodies from.
///
/// `categories` and `section` resolve a query and may block on the network.
/// The `cached_*` methods return the current snapshot and never block; a
/// query in flight elsewhere reports `is_loading`.
pub trait ContentSource {
    /// Resolve the category listing.
    fn categories(&self) -> QueryState<Vec<Category>, FetchError>;

    /// Resolve the body of one section.
    ///
    /// Sources report an unknown id either as an error (remote: HTTP 404) or
    /// as an idle state (static catalog), which renders the welcome state.
    fn section(&self, id: &str) -> QueryState<SectionContent, FetchError>;

    /// Current category listing without fetching.
    fn cached_categories(&self) -> QueryState<Vec<Category>, FetchError>;

    /// Current body of one section without fetching.
    fn cached_section(&self, id: &str) -> QueryState<SectionContent, FetchError>;
}

/// Static catalog: always loaded, never fails, never blocks.
impl ContentSource for Catalog {
    fn categories(&self) -> QueryState<Vec<Category>, FetchError> {
        QueryState::ready(Catalog::categories(self).to_vec(), Instant::now())
    }

    fn section(&self, id: &str) -> QueryState<SectionContent, FetchError> {
        self.section_content(id)
            .map_or_else(QueryState::idle, |content| {
                QueryState::ready(content, Instant::now())
            })
    }

    fn cached_categories(&self) -> QueryState<Vec<Category>, FetchError> {
        ContentSource::categories(self)
    }

    fn cached_section(&self, id: &str) -> QueryState<SectionContent, FetchError> {
        ContentSource::section(self, id)
    }
}

/// Remote backend through the cached client.
impl ContentSource for DocsClient {
    fn categories(&self) -> QueryState<Vec<Category>, FetchError> {
        DocsClient::categories(self)
    }

    fn section(&self, id: &str) -> QueryState<SectionContent, FetchError> {
        DocsClient::section(self, id)
    }

    fn cached_categories(&self) -> QueryState<Vec<Category>, FetchError> {
        DocsClient::cached_categories(self)
    }

    fn cached_section(&self, id: &str) -> QueryState<SectionContent, FetchError> {
        DocsClient::cached_section(self, id)
    }
}

impl<S: ContentSource + ?Sized> ContentSource for Arc<S> {
    fn categories(&self) -> QueryState<Vec<Category>, FetchError> {
        (**self).categories()
    }

    fn section(&self, id: &str) -> QueryState<SectionContent, FetchError> {
        (**self).section(id)
    }

    fn cached_categories(&self) -> QueryState<Vec<Category>, FetchError> {
        (**self).cached_categories()
    }

    fn cached_section(&self, id: &str) -> QueryState<SectionContent, FetchError> {
        (**self).cached_section(id)
    }
}
