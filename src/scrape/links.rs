//! Outbound-link collection

use crate::scrape::error::ScrapeError;
use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::trace;
use url::Url;

/// Collect links whose host differs from the page's own host
///
/// Relative hrefs are resolved against `base`; hrefs that fail to resolve
/// are skipped rather than aborting the whole scrape. Duplicates are
/// removed, keeping first-seen order.
pub fn outbound_links(base: &Url, html: &str) -> Result<Vec<String>, ScrapeError> {
    let document = Html::parse_document(html);

    let anchor_selector = Selector::parse("a[href]")
        .map_err(|e| ScrapeError::Selector(format!("Failed to parse anchor selector: {}", e)))?;

    let base_host = base.host_str();

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&anchor_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let resolved = match base.join(href) {
            Ok(url) => url,
            Err(e) => {
                trace!("Skipping unresolvable href {:?}: {}", href, e);
                continue;
            }
        };

        if resolved.host_str() == base_host {
            continue;
        }

        let link = resolved.to_string();
        if seen.insert(link.clone()) {
            links.push(link);
        }
    }

    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_host_and_fragment_links_filtered() {
        let base = Url::parse("http://example.com/").unwrap();
        let html = r##"
            <a href="/about-us">About</a>
            <a href="http://other.com/x">Other</a>
            <a href="#">Top</a>
        "##;

        let links = outbound_links(&base, html).unwrap();
        assert_eq!(links, vec!["http://other.com/x"]);
    }

    #[test]
    fn test_duplicates_appear_once() {
        let base = Url::parse("http://example.com/").unwrap();
        let html = r#"
            <a href="http://other.com/x">first</a>
            <a href="http://other.com/x">second</a>
            <a href="https://third.net/page">third</a>
        "#;

        let links = outbound_links(&base, html).unwrap();
        assert_eq!(links, vec!["http://other.com/x", "https://third.net/page"]);
    }

    #[test]
    fn test_malformed_href_skipped() {
        let base = Url::parse("http://example.com/").unwrap();
        // A scheme-only href fails to resolve and must not abort the scrape
        let html = r#"
            <a href="http://">broken</a>
            <a href="http://other.com/ok">fine</a>
        "#;

        let links = outbound_links(&base, html).unwrap();
        assert_eq!(links, vec!["http://other.com/ok"]);
    }

    #[test]
    fn test_no_anchors_yields_empty() {
        let base = Url::parse("http://example.com/").unwrap();
        let links = outbound_links(&base, "<html><body><p>text</p></body></html>").unwrap();
        assert!(links.is_empty());
    }
}
