//! Error types for the keywords module

use crate::error::Error as CrateError;
use crate::fetch::FetchError;
use crate::scrape::ScrapeError;
use thiserror::Error;

/// Error type for keyword extraction
#[derive(Debug, Error)]
pub enum KeywordError {
    /// Failure fetching a page
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Failure scraping a page
    #[error("scrape error: {0}")]
    Scrape(#[from] ScrapeError),

    /// Failure generating keywords with the model
    #[error("model error: {0}")]
    Model(String),
}

impl From<KeywordError> for CrateError {
    fn from(err: KeywordError) -> Self {
        match err {
            KeywordError::Fetch(e) => e.into(),
            KeywordError::Scrape(e) => e.into(),
            KeywordError::Model(msg) => CrateError::Analysis(msg),
        }
    }
}
