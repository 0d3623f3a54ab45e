//! Error types for the scrape module

use crate::error::Error as CrateError;
use thiserror::Error;

/// Error type for scrape operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// HTML selector error
    #[error("HTML selector error: {0}")]
    Selector(String),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl From<ScrapeError> for CrateError {
    fn from(err: ScrapeError) -> Self {
        CrateError::Scrape(err.to_string())
    }
}
