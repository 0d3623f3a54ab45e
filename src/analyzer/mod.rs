//! Website analysis: summary, blog titles, marketing channels
//!
//! Three strictly sequential model round-trips: the blog-title and channel
//! prompts both build on the summary produced by the first call.

mod error;

pub use error::AnalyzeError;

use crate::fetch::PageFetcher;
use crate::model::{GenerationConfig, ModelClient};
use crate::scrape::{self, ANALYZER_EXCLUDED_TAGS};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Character budget for page text sent to the model
const PAGE_TEXT_BUDGET: usize = 3000;

/// The closed set of recommendable marketing channels
pub const MARKETING_CHANNELS: &[&str] = &["SEO", "PPC", "Social Media", "Content Marketing"];

/// Maximum blog titles / channels returned
const MAX_SUGGESTIONS: usize = 3;

/// Result of analyzing one website
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebsiteAnalysis {
    /// Three-sentence company summary
    pub summary: String,

    /// Up to three suggested blog titles
    pub blog_titles: Vec<String>,

    /// Up to three channels, always a subset of [`MARKETING_CHANNELS`]
    pub marketing_channels: Vec<String>,
}

/// Analyze a website: summarize it, suggest blog titles, recommend channels
#[instrument(skip(fetcher, model), level = "debug")]
pub async fn analyze_website(
    fetcher: &PageFetcher,
    model: &ModelClient,
    url: &str,
) -> Result<WebsiteAnalysis, AnalyzeError> {
    let html = fetcher.fetch(url).await?;

    let text = scrape::visible_text(&html, ANALYZER_EXCLUDED_TAGS);
    let text = scrape::truncate_chars(&text, PAGE_TEXT_BUDGET);

    let summary_prompt = ModelClient::instruction_prompt(&format!(
        "Summarize what this company does in 3 sentences:\n{}",
        text
    ));
    let summary = model
        .generate(&summary_prompt, GenerationConfig::prose())
        .await
        .map_err(|e| AnalyzeError::Analysis(e.to_string()))?;
    debug!("Generated summary of length {}", summary.len());

    let blog_prompt = ModelClient::instruction_prompt(&format!(
        "Suggest 3 SEO-friendly blog titles for this company:\n{}",
        summary
    ));
    let blog_output = model
        .generate(&blog_prompt, GenerationConfig::prose())
        .await
        .map_err(|e| AnalyzeError::Analysis(e.to_string()))?;
    let blog_titles = split_suggestions(&blog_output);

    let channel_prompt = ModelClient::instruction_prompt(&format!(
        "Recommend best marketing channels from [{}]:\n{}",
        MARKETING_CHANNELS.join(", "),
        summary
    ));
    let channel_output = model
        .generate(&channel_prompt, GenerationConfig::prose())
        .await
        .map_err(|e| AnalyzeError::Analysis(e.to_string()))?;
    let marketing_channels = validate_channels(&channel_output);
    if marketing_channels.is_empty() {
        warn!("Model recommended no channel from the closed set for {}", url);
    }

    Ok(WebsiteAnalysis {
        summary,
        blog_titles,
        marketing_channels,
    })
}

/// Split model prose into suggestion lines
///
/// Non-empty lines with leading/trailing bullet markers stripped, capped
/// at [`MAX_SUGGESTIONS`].
fn split_suggestions(output: &str) -> Vec<String> {
    output
        .lines()
        .map(strip_bullet)
        .filter(|line| !line.is_empty())
        .take(MAX_SUGGESTIONS)
        .map(|line| line.to_string())
        .collect()
}

/// Map model prose onto the closed channel set
///
/// Each cleaned line is matched case-insensitively against the canonical
/// channel names; unmatched lines are dropped and duplicates removed, so
/// the result is always a subset of [`MARKETING_CHANNELS`].
fn validate_channels(output: &str) -> Vec<String> {
    let mut channels: Vec<String> = Vec::new();

    for line in output.lines() {
        let line = strip_bullet(line);
        if line.is_empty() {
            continue;
        }

        let matched = MARKETING_CHANNELS.iter().find(|channel| {
            line.eq_ignore_ascii_case(channel)
                || line.to_ascii_lowercase().contains(&channel.to_ascii_lowercase())
        });

        if let Some(channel) = matched {
            if !channels.iter().any(|c| c == channel) {
                channels.push(channel.to_string());
            }
        }

        if channels.len() >= MAX_SUGGESTIONS {
            break;
        }
    }

    channels
}

/// Strip bullet markers and numbering from a suggestion line
fn strip_bullet(line: &str) -> &str {
    let line = line.trim_matches(|c: char| c == '-' || c == '*' || c.is_whitespace());

    // Lists often come back numbered ("1. Title", "2) Title"). Only strip
    // the prefix when the digits end in a list delimiter, so a title that
    // genuinely starts with a number ("2026 Widget Trends") is kept whole.
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        if let Some(rest) = line[digits..].strip_prefix(['.', ')']) {
            return rest.trim_start();
        }
    }

    line
}
