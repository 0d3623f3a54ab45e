//! # sitelens - SEO website analysis service
//!
//! Fetches a website's pages, extracts HTML signals (title, meta
//! description, headings, links), and drives a generative model to produce
//! keyword lists, company summaries, blog-title suggestions, and
//! marketing-channel recommendations, exposed as cached HTTP endpoints.
//!
//! ## Components
//!
//! - [`fetch`]: page fetching with a uniform bounded timeout
//! - [`scrape`]: pure HTML signal extraction (metadata, links, core pages,
//!   visible text)
//! - [`model`]: client for an OpenAI-compatible completions backend
//! - [`keywords`]: per-page keyword extraction and count-based aggregation
//! - [`analyzer`]: summary / blog-title / channel generation
//! - [`api`]: axum router with an LRU+TTL response cache
//!
//! ## Example
//!
//! ```rust,no_run
//! use sitelens::api::{self, AppState, ResponseCache};
//! use sitelens::fetch::PageFetcher;
//! use sitelens::model::ModelClient;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let fetcher = PageFetcher::new()?;
//!     let model = ModelClient::new("http://127.0.0.1:8080", "mistral-7b-instruct")?;
//!     let cache = ResponseCache::new(1024, Duration::from_secs(3600))?;
//!
//!     let state = AppState::new(fetcher, model, cache);
//!     api::serve("127.0.0.1:8000".parse()?, state).await?;
//!     Ok(())
//! }
//! ```

mod error;

pub mod analyzer;
pub mod api;
pub mod config;
pub mod fetch;
pub mod keywords;
pub mod model;
pub mod scrape;

pub use error::Error;

/// Re-export of common types for public use
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::error::Result;
}
