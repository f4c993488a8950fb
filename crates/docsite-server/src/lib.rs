//! HTTP server for docsite.
//!
//! Serves the documentation catalog in two forms:
//! - JSON API endpoints under `/api/documentation` consumed by the client
//! - Server-rendered documentation pages under `/docs`
//!
//! # Quick Start
//!
//! ```ignore
//! use docsite_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_owned(),
//!         port: 7878,
//!         ..Default::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Routes
//!
//! ```text
//! GET /api/documentation/categories      -> Category[]
//! GET /api/documentation/section/{id}    -> {id, content} | 404
//! GET /api/documentation/search?q=...    -> {results}
//! GET /docs?section=...&sidebar=open     -> HTML page
//! GET /                                  -> redirect to /docs
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use docsite_catalog::Catalog;
use state::AppState;

pub use error::ServerError;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// JSON catalog file (`None` serves the builtin catalog).
    pub catalog_path: Option<PathBuf>,
    /// Section shown by `/docs` without a `section` parameter.
    pub default_section: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7878,
            catalog_path: None,
            default_section: docsite_catalog::DEFAULT_SECTION_ID.to_owned(),
        }
    }
}

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or the server fails to
/// start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = match &config.catalog_path {
        Some(path) => Catalog::from_json_file(path)?,
        None => Catalog::builtin(),
    };
    tracing::info!(
        categories = catalog.categories().len(),
        sections = catalog.sections().count(),
        "Catalog loaded"
    );

    let state = Arc::new(AppState {
        catalog: Arc::new(catalog),
        default_section: config.default_section.clone(),
    });

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from docsite config.
#[must_use]
pub fn server_config_from_docsite_config(config: &docsite_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        catalog_path: config.docs_resolved.catalog_path.clone(),
        default_section: config.docs_resolved.default_section.clone(),
    }
}
