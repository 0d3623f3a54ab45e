//! HTTP API for the sitelens crate
//!
//! Thin axum layer over the scrape/keywords/analyzer pipelines. Handlers
//! share one fetcher, one model client, and one response cache, all built
//! at startup and injected through [`AppState`].

mod cache;
mod handlers;

pub use cache::{CachedResponse, ResponseCache};

use crate::fetch::PageFetcher;
use crate::model::ModelClient;
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared state injected into every handler
#[derive(Clone)]
pub struct AppState {
    /// Page fetcher with the uniform fetch timeout
    pub fetcher: PageFetcher,

    /// Generative model client
    pub model: ModelClient,

    /// Response cache keyed by endpoint + URL
    pub cache: Arc<ResponseCache>,
}

impl AppState {
    /// Bundle the shared services for the router
    pub fn new(fetcher: PageFetcher, model: ModelClient, cache: ResponseCache) -> Self {
        Self {
            fetcher,
            model,
            cache: Arc::new(cache),
        }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    // TODO: add /suggest-blogs once a hosted-model backend for it exists;
    // the original service declared the route but never implemented it
    Router::new()
        .route("/health", get(handlers::health))
        .route("/meta_data", get(handlers::meta_data))
        .route("/outbound-links", get(handlers::outbound_links))
        .route("/target-keywords", get(handlers::target_keywords))
        .route("/analyze-website", get(handlers::analyze_website))
        .route("/company-summary", get(handlers::company_summary))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Bind and serve the API
pub async fn serve(addr: SocketAddr, state: AppState) -> crate::error::Result<()> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| crate::error::Error::Other(format!("Failed to bind {}: {}", addr, e)))?;

    info!("API server listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| crate::error::Error::Other(format!("Server error: {}", e)))
}
