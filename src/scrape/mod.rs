//! HTML signal extraction for the sitelens crate
//!
//! Everything in this module is pure: functions take already-fetched HTML
//! (plus the page URL where resolution matters) and return extracted
//! signals, so they can be tested without a network.

mod core_pages;
mod error;
mod links;
mod metadata;
mod text;

pub use core_pages::core_pages;
pub use error::ScrapeError;
pub use links::outbound_links;
pub use metadata::extract_metadata;
pub use text::{visible_text, truncate_chars, ANALYZER_EXCLUDED_TAGS, KEYWORD_EXCLUDED_TAGS};

use serde::{Deserialize, Serialize};

/// Signals extracted from a single page's head and headings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMetadata {
    /// Text of the `<title>` element, if present
    pub title: Option<String>,

    /// Content of `<meta name="description">`, if present
    pub description: Option<String>,

    /// Trimmed text of every `<h1>` in document order
    pub h1_tags: Vec<String>,
}
