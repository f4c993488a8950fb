//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use docsite_catalog::Catalog;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Catalog served by the API and rendered by the pages.
    pub(crate) catalog: Arc<Catalog>,
    /// Section shown when `/docs` has no `section` parameter.
    pub(crate) default_section: String,
}
