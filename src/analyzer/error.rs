//! Error types for the analyzer module

use crate::error::Error as CrateError;
use crate::fetch::FetchError;
use thiserror::Error;

/// Error type for website analysis
///
/// Fetch failures are a distinct kind so the API layer can report
/// "couldn't reach the site" separately from "analysis broke".
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// Failure fetching the website
    #[error("Failed to fetch website: {0}")]
    Fetch(#[from] FetchError),

    /// Failure anywhere after the fetch (model call, empty output)
    #[error("Analysis failed: {0}")]
    Analysis(String),
}

impl From<AnalyzeError> for CrateError {
    fn from(err: AnalyzeError) -> Self {
        match err {
            AnalyzeError::Fetch(e) => e.into(),
            AnalyzeError::Analysis(msg) => CrateError::Analysis(msg),
        }
    }
}
