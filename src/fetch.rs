//! Page fetching for the sitelens crate
//!
//! All outbound page requests go through [`PageFetcher`] so the whole
//! service shares one connection pool, one user agent, and one bounded
//! timeout.

use crate::error::Error as CrateError;
use reqwest::Client as ReqwestClient;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

/// Default timeout for page fetches in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// User agent sent with every page fetch
const USER_AGENT: &str = concat!("sitelens/", env!("CARGO_PKG_VERSION"));

/// Error type for page fetches
///
/// A failed fetch is distinguishable from a successful fetch of an empty
/// page: the former is an `Err`, the latter an `Ok` with empty signals.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level failure (DNS, connect, timeout)
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("unexpected status {status} fetching {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// URL that was fetched
        url: String,
    },

    /// The URL could not be parsed
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl From<FetchError> for CrateError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Request(e) => CrateError::Http(e),
            _ => CrateError::Fetch(err.to_string()),
        }
    }
}

/// HTTP client for fetching website pages
#[derive(Clone)]
pub struct PageFetcher {
    client: ReqwestClient,
}

impl PageFetcher {
    /// Create a fetcher with the default timeout
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a fetcher with a custom timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client })
    }

    /// Fetch a page and return its body text
    ///
    /// Non-success statuses are errors; callers never have to inspect a
    /// status code themselves.
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let parsed = url::Url::parse(url)?;

        debug!("Fetching {}", parsed);
        let response = self.client.get(parsed.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: parsed.to_string(),
            });
        }

        let body = response.text().await?;
        debug!("Fetched {} bytes from {}", body.len(), parsed);
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn test_fetch_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html><body>hello</body></html>")
            .expect(1)
            .create_async()
            .await;

        let fetcher = PageFetcher::new().unwrap();
        let body = fetcher.fetch(&server.url()).await.unwrap();
        assert!(body.contains("hello"));

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_not_found_is_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .with_body("not here")
            .create_async()
            .await;

        let fetcher = PageFetcher::new().unwrap();
        let result = fetcher.fetch(&format!("{}/missing", server.url())).await;

        assert!(matches!(result, Err(FetchError::Status { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_fetch_invalid_url() {
        let fetcher = PageFetcher::new().unwrap();
        let result = fetcher.fetch("not a url").await;
        assert!(matches!(result, Err(FetchError::Url(_))));
    }

    #[tokio::test]
    async fn test_fetch_connection_error() {
        // Nothing listens on this port
        let fetcher = PageFetcher::new().unwrap();
        let result = fetcher.fetch("http://127.0.0.1:1/").await;
        assert!(matches!(result, Err(FetchError::Request(_))));
    }
}
