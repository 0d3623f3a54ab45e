//! Title, meta-description, and heading extraction

use crate::scrape::error::ScrapeError;
use crate::scrape::PageMetadata;
use scraper::{Html, Selector};

/// Extract title, meta description, and `<h1>` headings from a page
///
/// A missing `<title>` or description is represented as `None`, not an
/// error; a page with no `<h1>` yields an empty vec.
pub fn extract_metadata(html: &str) -> Result<PageMetadata, ScrapeError> {
    let document = Html::parse_document(html);

    let title_selector = Selector::parse("title")
        .map_err(|e| ScrapeError::Selector(format!("Failed to parse title selector: {}", e)))?;

    let title = document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>());

    let description_selector = Selector::parse("meta[name='description']").map_err(|e| {
        ScrapeError::Selector(format!("Failed to parse description selector: {}", e))
    })?;

    let description = document
        .select(&description_selector)
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(|s| s.to_string());

    let h1_selector = Selector::parse("h1")
        .map_err(|e| ScrapeError::Selector(format!("Failed to parse h1 selector: {}", e)))?;

    let h1_tags = document
        .select(&h1_selector)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .collect();

    Ok(PageMetadata {
        title,
        description,
        h1_tags,
    })
}
