//! Visible-text extraction for model prompts

use scraper::{Html, Node};

/// Subtrees dropped before keyword extraction
pub const KEYWORD_EXCLUDED_TAGS: &[&str] = &["script", "style", "nav", "footer"];

/// Subtrees dropped before website analysis (boilerplate-heavier cut)
pub const ANALYZER_EXCLUDED_TAGS: &[&str] =
    &["script", "style", "nav", "footer", "header", "form"];

/// Extract the visible text of a page, skipping excluded subtrees
///
/// Text nodes are joined with single spaces and runs of whitespace are
/// collapsed, so the result is one normalized line suitable for a prompt.
pub fn visible_text(html: &str, excluded_tags: &[&str]) -> String {
    let document = Html::parse_document(html);

    let mut parts: Vec<&str> = Vec::new();
    let mut stack = vec![document.tree.root()];

    while let Some(node) = stack.pop() {
        match node.value() {
            Node::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    parts.push(trimmed);
                }
            }
            Node::Element(element) => {
                if excluded_tags
                    .iter()
                    .any(|tag| element.name().eq_ignore_ascii_case(tag))
                {
                    continue;
                }
                // Reverse so children pop in document order
                for child in node.children().rev() {
                    stack.push(child);
                }
            }
            _ => {
                for child in node.children().rev() {
                    stack.push(child);
                }
            }
        }
    }

    let joined = parts.join(" ");
    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate a string to at most `max_chars` characters
///
/// Operates on characters rather than bytes so multi-byte content never
/// splits mid-codepoint. This is the model input budget proxy, not a real
/// token count.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
