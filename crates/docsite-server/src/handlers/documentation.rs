//! Documentation API endpoints.
//!
//! JSON views over the catalog, matching what the remote client expects.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use docsite_catalog::{Category, SearchResults, SectionContent};
use serde::Deserialize;

use crate::error::ServerError;
use crate::state::AppState;

/// Query parameters for GET /api/documentation/search.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchParams {
    #[serde(default)]
    q: String,
}

/// Handle GET /api/documentation/categories.
pub(crate) async fn get_categories(State(state): State<Arc<AppState>>) -> Json<Vec<Category>> {
    Json(state.catalog.categories().to_vec())
}

/// Handle GET /api/documentation/section/{id}.
pub(crate) async fn get_section(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SectionContent>, ServerError> {
    state
        .catalog
        .section_content(&id)
        .map(Json)
        .ok_or_else(|| {
            tracing::debug!(%id, "Section not found");
            ServerError::SectionNotFound(id)
        })
}

/// Handle GET /api/documentation/search?q=...
pub(crate) async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<SearchResults> {
    let results = state.catalog.search(&params.q);
    tracing::debug!(query = %params.q, hits = results.results.len(), "Search");
    Json(results)
}
