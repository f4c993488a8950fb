//! Server-rendered documentation page.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Html;
use docsite_view::DocsPage;
use serde::Deserialize;

use crate::state::AppState;

/// Query parameters for GET /docs.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PageParams {
    section: Option<String>,
    sidebar: Option<String>,
    /// Comma-separated ids of tree nodes toggled away from their default.
    toggle: Option<String>,
}

/// Handle GET /docs.
///
/// Every request renders a fresh page. Toggle state travels in the query
/// string. Placeholder content that becomes visible is substituted before
/// the response is sent.
pub(crate) async fn get_docs_page(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageParams>,
) -> Html<String> {
    let section = params
        .section
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| state.default_section.clone());

    let mut page = DocsPage::new(Arc::clone(&state.catalog)).with_active_section(section);
    if params.sidebar.as_deref() == Some("open") {
        page.open_sidebar();
    }
    for id in params.toggle.iter().flat_map(|t| t.split(',')) {
        if !id.is_empty() {
            page.toggle_node(id);
        }
    }

    let mut html = page.render();
    if let Some(delay) = page.next_substitution_in() {
        tokio::time::sleep(delay).await;
        html = page.render();
    }
    Html(html)
}
