//! Heuristic identification of a site's core pages

use crate::scrape::error::ScrapeError;
use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::trace;
use url::Url;

/// Substrings that mark an href as pointing at a high-value page
const CORE_KEYWORDS: &[&str] = &["about", "product", "service", "contact", "features"];

/// Maximum number of core pages returned per site
const MAX_CORE_PAGES: usize = 5;

/// Identify core pages (home, about, products/services, contact) for a site
///
/// The input URL is always the first entry, so it survives the cap of
/// [`MAX_CORE_PAGES`] no matter how many hrefs match the heuristics.
/// Dedupe keeps first-seen order, which makes truncation deterministic.
pub fn core_pages(base: &Url, html: &str) -> Result<Vec<String>, ScrapeError> {
    let document = Html::parse_document(html);

    let anchor_selector = Selector::parse("a[href]")
        .map_err(|e| ScrapeError::Selector(format!("Failed to parse anchor selector: {}", e)))?;

    let mut seen = HashSet::new();
    let mut pages = Vec::new();

    // Homepage first, unconditionally
    let home = base.to_string();
    seen.insert(home.clone());
    pages.push(home);

    for element in document.select(&anchor_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let lowered = href.to_ascii_lowercase();
        if !CORE_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
            continue;
        }

        let resolved = match base.join(href) {
            Ok(url) => url,
            Err(e) => {
                trace!("Skipping unresolvable href {:?}: {}", href, e);
                continue;
            }
        };

        let page = resolved.to_string();
        if seen.insert(page.clone()) {
            pages.push(page);
        }

        if pages.len() >= MAX_CORE_PAGES {
            break;
        }
    }

    Ok(pages)
}
