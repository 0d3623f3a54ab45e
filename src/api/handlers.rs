//! HTTP handlers for the analysis endpoints
//!
//! Every handler takes a `url` query parameter, consults the response
//! cache, runs its pipeline on a miss, and stores whatever it produced
//! (success or domain error) under `endpoint:url`. Domain errors come back
//! as 400 with an `error` field; handlers always answer with JSON.

use crate::analyzer;
use crate::api::cache::CachedResponse;
use crate::api::AppState;
use crate::keywords;
use crate::scrape;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, instrument};
use url::Url;

/// Query parameters shared by every endpoint
#[derive(Debug, Deserialize)]
pub struct UrlQuery {
    /// Website URL to analyze
    pub url: Option<String>,
}

impl IntoResponse for CachedResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK);
        (status, Json(self.body)).into_response()
    }
}

fn ok(body: serde_json::Value) -> CachedResponse {
    CachedResponse { status: 200, body }
}

fn bad_request(message: impl std::fmt::Display) -> CachedResponse {
    CachedResponse {
        status: 400,
        body: json!({ "error": message.to_string() }),
    }
}

/// Run one endpoint through the cache
async fn with_cache<F, Fut>(state: &AppState, endpoint: &str, url: &str, run: F) -> Response
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = CachedResponse>,
{
    let key = crate::api::cache::ResponseCache::key(endpoint, url);

    if let Some(cached) = state.cache.get(&key).await {
        return cached.into_response();
    }

    let response = run().await;
    state.cache.insert(key, response.clone()).await;
    response.into_response()
}

fn require_url(query: UrlQuery) -> Result<String, Response> {
    match query.url {
        Some(url) if !url.trim().is_empty() => Ok(url),
        _ => Err(bad_request("missing url query parameter").into_response()),
    }
}

/// `GET /meta_data`: title, meta description, and `<h1>` extraction
#[instrument(skip(state, query), level = "debug")]
pub async fn meta_data(State(state): State<AppState>, Query(query): Query<UrlQuery>) -> Response {
    let url = match require_url(query) {
        Ok(url) => url,
        Err(response) => return response,
    };

    with_cache(&state, "meta_data", &url, || async {
        let html = match state.fetcher.fetch(&url).await {
            Ok(html) => html,
            Err(e) => return bad_request(format!("Could not fetch the website: {}", e)),
        };

        match scrape::extract_metadata(&html) {
            Ok(metadata) => ok(json!(metadata)),
            Err(e) => {
                error!("Metadata extraction failed for {}: {}", url, e);
                bad_request(e)
            }
        }
    })
    .await
}

/// `GET /outbound-links`: links pointing off the page's host
#[instrument(skip(state, query), level = "debug")]
pub async fn outbound_links(
    State(state): State<AppState>,
    Query(query): Query<UrlQuery>,
) -> Response {
    let url = match require_url(query) {
        Ok(url) => url,
        Err(response) => return response,
    };

    with_cache(&state, "outbound-links", &url, || async {
        let base = match Url::parse(&url) {
            Ok(base) => base,
            Err(e) => return bad_request(format!("Could not fetch the website: {}", e)),
        };

        let html = match state.fetcher.fetch(&url).await {
            Ok(html) => html,
            Err(e) => return bad_request(format!("Could not fetch the website: {}", e)),
        };

        match scrape::outbound_links(&base, &html) {
            Ok(links) => ok(json!({ "outbound_links": links })),
            Err(e) => {
                error!("Link extraction failed for {}: {}", url, e);
                bad_request(e)
            }
        }
    })
    .await
}

/// `GET /target-keywords`: core pages plus ranked keywords
#[instrument(skip(state, query), level = "debug")]
pub async fn target_keywords(
    State(state): State<AppState>,
    Query(query): Query<UrlQuery>,
) -> Response {
    let url = match require_url(query) {
        Ok(url) => url,
        Err(response) => return response,
    };

    with_cache(&state, "target-keywords", &url, || async {
        match keywords::get_target_keywords(&state.fetcher, &state.model, &url).await {
            Ok(report) => ok(json!(report)),
            Err(e) => {
                error!("Keyword extraction failed for {}: {}", url, e);
                bad_request(e)
            }
        }
    })
    .await
}

/// `GET /analyze-website`: summary, blog titles, and channel
/// recommendations
#[instrument(skip(state, query), level = "debug")]
pub async fn analyze_website(
    State(state): State<AppState>,
    Query(query): Query<UrlQuery>,
) -> Response {
    run_analysis(state, "analyze-website", query).await
}

/// `GET /company-summary`: alias of `/analyze-website`, cached under its
/// own key
#[instrument(skip(state, query), level = "debug")]
pub async fn company_summary(
    State(state): State<AppState>,
    Query(query): Query<UrlQuery>,
) -> Response {
    run_analysis(state, "company-summary", query).await
}

async fn run_analysis(state: AppState, endpoint: &str, query: UrlQuery) -> Response {
    let url = match require_url(query) {
        Ok(url) => url,
        Err(response) => return response,
    };

    with_cache(&state, endpoint, &url, || async {
        match analyzer::analyze_website(&state.fetcher, &state.model, &url).await {
            Ok(analysis) => ok(json!(analysis)),
            // AnalyzeError's Display already carries the fetch-vs-analysis
            // prefix; the specific cause was logged where it happened
            Err(e) => {
                error!("Analysis failed for {}: {}", url, e);
                bad_request(e)
            }
        }
    })
    .await
}

/// `GET /health`: liveness probe
pub async fn health() -> Response {
    Json(json!({ "status": "ok" })).into_response()
}
