//! Target-keyword extraction for a site's core pages
//!
//! Each core page is fetched, reduced to visible text, and handed to the
//! model with an instruction to return a JSON array of SEO keywords. The
//! per-page lists are aggregated by exact occurrence count.

mod error;

pub use error::KeywordError;

use crate::fetch::PageFetcher;
use crate::model::{GenerationConfig, ModelClient};
use crate::scrape::{self, KEYWORD_EXCLUDED_TAGS};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, instrument, warn};
use url::Url;

/// Character budget for page text sent to the model
const PAGE_TEXT_BUDGET: usize = 3000;

/// Maximum keywords kept per page
const MAX_KEYWORDS_PER_PAGE: usize = 10;

/// Maximum keywords in the aggregated report
const MAX_KEYWORDS_TOTAL: usize = 15;

/// Keywords aggregated across a site's core pages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordReport {
    /// The core pages that were scraped
    pub core_pages: Vec<String>,

    /// Keywords ranked by descending occurrence count
    pub keywords: Vec<String>,
}

/// Extract SEO keywords from a single page
///
/// Model output that cannot be parsed as a JSON array degrades to an empty
/// list for the page; it is a recoverable per-page condition, never a
/// request-level error.
#[instrument(skip(fetcher, model), level = "debug")]
pub async fn extract_keywords_from_page(
    fetcher: &PageFetcher,
    model: &ModelClient,
    url: &str,
) -> Result<Vec<String>, KeywordError> {
    let html = fetcher.fetch(url).await?;
    let text = scrape::visible_text(&html, KEYWORD_EXCLUDED_TAGS);
    let text = scrape::truncate_chars(&text, PAGE_TEXT_BUDGET);

    let prompt = ModelClient::instruction_prompt(&format!(
        "Analyze this text and extract the top 10 most important keywords \
         for SEO, focusing on business offerings and products. \
         Return only a JSON array:\n{}",
        text
    ));

    let output = model
        .generate(&prompt, GenerationConfig::structured())
        .await
        .map_err(|e| KeywordError::Model(e.to_string()))?;

    let mut keywords = match parse_keyword_array(&output) {
        Some(keywords) => keywords,
        None => {
            warn!("Model output for {} was not a JSON array, treating as no keywords", url);
            Vec::new()
        }
    };
    keywords.truncate(MAX_KEYWORDS_PER_PAGE);

    debug!("Extracted {} keywords from {}", keywords.len(), url);
    Ok(keywords)
}

/// Build the aggregated keyword report for a site
///
/// Failing to fetch the input URL is an error; failures on individual core
/// pages degrade to empty per-page lists so one broken subpage cannot void
/// the rest of the report.
#[instrument(skip(fetcher, model), level = "debug")]
pub async fn get_target_keywords(
    fetcher: &PageFetcher,
    model: &ModelClient,
    url: &str,
) -> Result<KeywordReport, KeywordError> {
    let base = Url::parse(url).map_err(crate::fetch::FetchError::Url)?;
    let html = fetcher.fetch(url).await?;
    let core_pages = scrape::core_pages(&base, &html)?;

    let mut all_keywords = Vec::new();
    for page in &core_pages {
        match extract_keywords_from_page(fetcher, model, page).await {
            Ok(keywords) => all_keywords.extend(keywords),
            Err(e) => warn!("Skipping core page {}: {}", page, e),
        }
    }

    let keywords = rank_keywords(all_keywords, MAX_KEYWORDS_TOTAL);

    Ok(KeywordReport {
        core_pages,
        keywords,
    })
}

/// Parse a JSON array of strings out of model output
///
/// The model is asked for a bare array but may wrap it in prose, so the
/// bracketed span is located first. Non-string entries are dropped.
fn parse_keyword_array(output: &str) -> Option<Vec<String>> {
    let trimmed = output.trim();

    let candidate = if trimmed.starts_with('[') {
        trimmed
    } else {
        let start = trimmed.find('[')?;
        let end = trimmed.rfind(']')?;
        if end <= start {
            return None;
        }
        &trimmed[start..=end]
    };

    let value: serde_json::Value = serde_json::from_str(candidate).ok()?;
    let array = value.as_array()?;

    Some(
        array
            .iter()
            .filter_map(|item| item.as_str().map(|s| s.to_string()))
            .collect(),
    )
}

/// Rank keywords by descending occurrence count
///
/// Counting is exact (case-sensitive, no normalization). Ties keep
/// first-seen order, so the ranking is stable and independent of how the
/// input pages were ordered, up to tie-breaking.
fn rank_keywords(all_keywords: Vec<String>, limit: usize) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for keyword in all_keywords {
        match counts.get_mut(&keyword) {
            Some(count) => *count += 1,
            None => {
                counts.insert(keyword.clone(), 1);
                order.push(keyword);
            }
        }
    }

    // Stable sort preserves first-seen order among equal counts
    order.sort_by_key(|keyword| std::cmp::Reverse(counts[keyword]));
    order.truncate(limit);
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[test]
    fn test_parse_bare_array() {
        let parsed = parse_keyword_array(r#"["widgets", "gadgets"]"#).unwrap();
        assert_eq!(parsed, vec!["widgets", "gadgets"]);
    }

    #[test]
    fn test_parse_array_wrapped_in_prose() {
        let output = "Here are the keywords:\n[\"seo\", \"marketing\"]\nHope that helps!";
        let parsed = parse_keyword_array(output).unwrap();
        assert_eq!(parsed, vec!["seo", "marketing"]);
    }

    #[test]
    fn test_parse_non_array_fails() {
        assert!(parse_keyword_array(r#"{"keywords": []}"#).is_none());
        assert!(parse_keyword_array("no json here").is_none());
        assert!(parse_keyword_array("").is_none());
    }

    #[test]
    fn test_parse_drops_non_string_entries() {
        let parsed = parse_keyword_array(r#"["a", 3, null, "b"]"#).unwrap();
        assert_eq!(parsed, vec!["a", "b"]);
    }

    #[test]
    fn test_rank_by_count_then_first_seen() {
        let input = ["b", "a", "c", "a", "c", "a"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let ranked = rank_keywords(input, 15);
        assert_eq!(ranked, vec!["a", "c", "b"]);
    }

    #[test]
    fn test_rank_is_case_sensitive() {
        let input = ["SEO", "seo", "SEO"].iter().map(|s| s.to_string()).collect();
        let ranked = rank_keywords(input, 15);
        assert_eq!(ranked, vec!["SEO", "seo"]);
    }

    #[test]
    fn test_rank_respects_limit() {
        let input: Vec<String> = (0..20).map(|i| format!("kw{}", i)).collect();
        let ranked = rank_keywords(input, MAX_KEYWORDS_TOTAL);
        assert_eq!(ranked.len(), 15);
    }

    #[test]
    fn test_rank_order_independent_up_to_ties() {
        let a: Vec<String> = ["x", "y", "y", "z"].iter().map(|s| s.to_string()).collect();
        let mut b = a.clone();
        b.reverse();

        assert_eq!(rank_keywords(a, 15)[0], "y");
        assert_eq!(rank_keywords(b, 15)[0], "y");
    }

    #[tokio::test]
    async fn test_extract_keywords_from_page() {
        let mut server = Server::new_async().await;
        let page_mock = server
            .mock("GET", "/products")
            .with_status(200)
            .with_body("<html><body><p>We sell industrial widgets</p></body></html>")
            .create_async()
            .await;
        let model_mock = server
            .mock("POST", "/v1/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": [{"text": "[\"widgets\", \"industrial supply\"]"}]}"#)
            .create_async()
            .await;

        let fetcher = PageFetcher::new().unwrap();
        let mut model = ModelClient::new("http://unused", "test-model").unwrap();
        model.set_base_url(server.url());

        let keywords =
            extract_keywords_from_page(&fetcher, &model, &format!("{}/products", server.url()))
                .await
                .unwrap();
        assert_eq!(keywords, vec!["widgets", "industrial supply"]);

        page_mock.assert_async().await;
        model_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unparseable_model_output_degrades_to_empty() {
        let mut server = Server::new_async().await;
        let _page = server
            .mock("GET", "/")
            .with_status(200)
            .with_body("<html><body>content</body></html>")
            .create_async()
            .await;
        let _model = server
            .mock("POST", "/v1/completions")
            .with_status(200)
            .with_body(r#"{"choices": [{"text": "I cannot produce JSON, sorry"}]}"#)
            .create_async()
            .await;

        let fetcher = PageFetcher::new().unwrap();
        let mut model = ModelClient::new("http://unused", "test-model").unwrap();
        model.set_base_url(server.url());

        let keywords = extract_keywords_from_page(&fetcher, &model, &server.url())
            .await
            .unwrap();
        assert!(keywords.is_empty());
    }

    #[tokio::test]
    async fn test_get_target_keywords_surfaces_input_fetch_error() {
        let mut server = Server::new_async().await;
        let _page = server
            .mock("GET", "/")
            .with_status(500)
            .create_async()
            .await;

        let fetcher = PageFetcher::new().unwrap();
        let model = ModelClient::new("http://unused", "test-model").unwrap();

        let result = get_target_keywords(&fetcher, &model, &server.url()).await;
        assert!(matches!(result, Err(KeywordError::Fetch(_))));
    }

    #[tokio::test]
    async fn test_broken_core_page_does_not_void_report() {
        let mut server = Server::new_async().await;
        // Homepage links to a core page that 404s; the homepage's own
        // keywords must still come back
        let _home = server
            .mock("GET", "/")
            .with_status(200)
            .with_body(r#"<html><body>Widget shop<a href="/about">About</a></body></html>"#)
            .expect_at_least(1)
            .create_async()
            .await;
        let _about = server
            .mock("GET", "/about")
            .with_status(404)
            .create_async()
            .await;
        let _model = server
            .mock("POST", "/v1/completions")
            .with_status(200)
            .with_body(r#"{"choices": [{"text": "[\"widgets\"]"}]}"#)
            .expect(1)
            .create_async()
            .await;

        let fetcher = PageFetcher::new().unwrap();
        let mut model = ModelClient::new("http://unused", "test-model").unwrap();
        model.set_base_url(server.url());

        let report = get_target_keywords(&fetcher, &model, &server.url())
            .await
            .unwrap();

        // Both pages are still listed as core pages, but only the
        // surviving one contributed keywords
        assert_eq!(report.core_pages.len(), 2);
        assert_eq!(report.keywords, vec!["widgets"]);
    }

    #[tokio::test]
    async fn test_get_target_keywords_aggregates() {
        let mut server = Server::new_async().await;
        // Homepage links to one core page; both get scraped for keywords
        let _home = server
            .mock("GET", "/")
            .with_status(200)
            .with_body(r#"<html><body><a href="/about">About</a></body></html>"#)
            .expect_at_least(1)
            .create_async()
            .await;
        let _about = server
            .mock("GET", "/about")
            .with_status(200)
            .with_body("<html><body>About our widget company</body></html>")
            .create_async()
            .await;
        let _model = server
            .mock("POST", "/v1/completions")
            .with_status(200)
            .with_body(r#"{"choices": [{"text": "[\"widgets\", \"company\"]"}]}"#)
            .expect(2)
            .create_async()
            .await;

        let fetcher = PageFetcher::new().unwrap();
        let mut model = ModelClient::new("http://unused", "test-model").unwrap();
        model.set_base_url(server.url());

        let report = get_target_keywords(&fetcher, &model, &server.url())
            .await
            .unwrap();

        assert_eq!(report.core_pages.len(), 2);
        assert_eq!(report.core_pages[0], format!("{}/", server.url()));
        // Both pages reported the same pair, so counts tie and first-seen
        // order holds
        assert_eq!(report.keywords, vec!["widgets", "company"]);
    }
}
