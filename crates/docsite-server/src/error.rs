//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// No section with the given id.
    #[error("Section not found: {0}")]
    SectionNotFound(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::SectionNotFound(id) => (
                StatusCode::NOT_FOUND,
                json!({"error": "Section not found", "id": id}),
            ),
        };

        (status, axum::Json(body)).into_response()
    }
}
