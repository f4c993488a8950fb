//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::response::Redirect;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        .route(
            "/api/documentation/categories",
            get(handlers::documentation::get_categories),
        )
        .route(
            "/api/documentation/section/{id}",
            get(handlers::documentation::get_section),
        )
        .route(
            "/api/documentation/search",
            get(handlers::documentation::search),
        );

    let page_routes = Router::new()
        .route("/", get(|| async { Redirect::temporary("/docs") }))
        .route("/docs", get(handlers::docs_page::get_docs_page));

    Router::new()
        .merge(api_routes)
        .merge(page_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use docsite_catalog::Catalog;
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    fn router() -> Router {
        create_router(Arc::new(AppState {
            catalog: Arc::new(Catalog::builtin()),
            default_section: "installation".to_owned(),
        }))
    }

    async fn get(uri: &str) -> (StatusCode, axum::http::HeaderMap, String) {
        let response = router()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_categories_endpoint() {
        let (status, _, body) = get("/api/documentation/categories").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json[0]["id"], "getting-started");
        assert_eq!(json[0]["sections"][0]["id"], "installation");
    }

    #[tokio::test]
    async fn test_section_endpoint() {
        let (status, _, body) = get("/api/documentation/section/quick-start").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["id"], "quick-start");
        assert!(json["content"].as_str().unwrap().contains("devkit new my-app"));
    }

    #[tokio::test]
    async fn test_section_endpoint_finds_nested_section() {
        let (status, _, body) = get("/api/documentation/section/plugin-lifecycle").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["id"], "plugin-lifecycle");
    }

    #[tokio::test]
    async fn test_section_endpoint_unknown_id() {
        let (status, _, body) = get("/api/documentation/section/nope").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"], "Section not found");
        assert_eq!(json["id"], "nope");
    }

    #[tokio::test]
    async fn test_search_endpoint() {
        let (status, _, body) = get("/api/documentation/search?q=INSTALL").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        let ids: Vec<&str> = json["results"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["id"].as_str().unwrap())
            .collect();
        assert!(ids.contains(&"installation"));
    }

    #[tokio::test]
    async fn test_search_endpoint_without_query() {
        let (status, _, body) = get("/api/documentation/search").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["results"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_docs_page_default_section() {
        let (status, headers, body) = get("/docs").await;

        assert_eq!(status, StatusCode::OK);
        assert!(
            headers[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/html")
        );
        assert!(body.contains("cargo install devkit"));
        assert!(body.contains(r#"data-section="installation" aria-current="page""#));
    }

    #[tokio::test]
    async fn test_docs_page_selected_section_with_open_sidebar() {
        let (status, _, body) = get("/docs?section=quick-start&sidebar=open").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("devkit new my-app"));
        assert!(body.contains("sidebar-overlay"));
    }

    #[tokio::test]
    async fn test_docs_page_unknown_section_shows_welcome() {
        let (status, _, body) = get("/docs?section=nope").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Welcome to the Documentation"));
    }

    #[tokio::test]
    async fn test_docs_page_toggle_expands_nested_node() {
        let (_, _, collapsed) = get("/docs?section=architecture").await;
        let (status, _, expanded) =
            get("/docs?section=architecture&toggle=plugin-lifecycle").await;

        assert_eq!(status, StatusCode::OK);
        assert!(!collapsed.contains("Plugins are loaded at startup"));
        assert!(collapsed.contains(
            r#"href="?section=architecture&amp;toggle=plugin-lifecycle" data-toggle="plugin-lifecycle""#
        ));
        assert!(expanded.contains("Plugins are loaded at startup"));
        assert!(expanded.contains(
            r#"href="?section=architecture" data-toggle="plugin-lifecycle" aria-expanded="true""#
        ));
    }

    #[tokio::test]
    async fn test_docs_page_substitutes_visible_placeholders() {
        let (_, _, subsection) = get("/docs?section=architecture").await;
        let (_, _, active) = get("/docs?section=plugin-host").await;

        assert!(!subsection.contains("Loading content..."));
        assert!(subsection.contains("everything you need to know about Plugin Host"));
        assert!(!active.contains("Loading content..."));
        assert!(active.contains("everything you need to know about Plugin Host"));
    }

    #[tokio::test]
    async fn test_root_redirects_to_docs() {
        let (status, headers, _) = get("/").await;

        assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(headers[header::LOCATION], "/docs");
    }

    #[tokio::test]
    async fn test_security_headers() {
        let (_, headers, _) = get("/api/documentation/categories").await;

        assert_eq!(headers["x-content-type-options"], "nosniff");
        assert_eq!(headers["x-frame-options"], "DENY");
        assert!(headers.contains_key("content-security-policy"));
    }
}
