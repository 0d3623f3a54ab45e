//! Error types for the sitelens crate

use thiserror::Error;

/// Result type for sitelens operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for sitelens operations
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Page fetch error
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// HTML scraping error
    #[error("Scrape error: {0}")]
    Scrape(String),

    /// Model backend returned an error response
    #[error("Model error: {status_code} - {message}")]
    Model {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },

    /// Website analysis error
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Unexpected response format
    #[error("Unexpected response format: {0}")]
    UnexpectedResponse(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}
