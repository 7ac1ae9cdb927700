//! Human-readable renderings for catalogue callers.
//!
//! Output is meant for display, not for parsing.

use crate::model::summary::Summary;
use once_cell::sync::Lazy;
use regex::Regex;

const PREVIEW_MAX_CHARS: usize = 100;
const KEYWORD_LISTING_HEADER: &str = "=== REGISTERED KEYWORDS ===";
const KEYWORD_LISTING_EMPTY: &str = "No keywords are registered in the catalogue.";

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Renders title, authors, body and keywords as labelled blocks.
pub fn format_details(summary: &Summary) -> String {
    format!(
        "TITLE: {}\n\nAUTHORS: {}\nSUMMARY:\n{}\n\nKEYWORDS: {}",
        summary.title(),
        summary.authors().join(", "),
        summary.body(),
        summary.keywords().join(", ")
    )
}

/// Renders a bulleted keyword report, or a notice when there are none.
pub fn keyword_listing<'a>(keywords: impl IntoIterator<Item = &'a str>) -> String {
    let mut lines = keywords.into_iter().peekable();
    if lines.peek().is_none() {
        return KEYWORD_LISTING_EMPTY.to_string();
    }

    let mut report = format!("{KEYWORD_LISTING_HEADER}\n\n");
    for keyword in lines {
        report.push_str("• ");
        report.push_str(keyword);
        report.push('\n');
    }
    report
}

/// One-line preview of a summary body.
///
/// Whitespace runs collapse to one space; the first 100 chars are kept.
/// Returns `None` for blank bodies.
pub fn preview_text(body: &str) -> Option<String> {
    let normalized = WHITESPACE_RE.replace_all(body, " ");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.chars().take(PREVIEW_MAX_CHARS).collect())
    }
}
