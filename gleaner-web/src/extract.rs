//! Snippet and date extraction from fetched HTML pages.
//!
//! A snippet is the page's meta description, or failing that the text of
//! its first paragraph. Dates are discovered as the first valid
//! `YYYY-MM-DD` sequence anywhere in the page.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use scraper::{Html, Selector};

/// Extract a short descriptive snippet from raw HTML.
///
/// Returns the trimmed `content` of `<meta name="description">` (name
/// matched case-insensitively) when present and non-empty, otherwise the
/// text of the first `<p>` element with its text nodes trimmed and joined
/// by single spaces, otherwise an empty string.
pub fn snippet_from_html(html: &str) -> String {
    let document = Html::parse_document(html);

    if let Some(description) = meta_description(&document) {
        return description;
    }

    first_paragraph(&document).unwrap_or_default()
}

fn meta_description(document: &Html) -> Option<String> {
    let Ok(selector) = Selector::parse("meta[name]") else {
        return None;
    };
    document
        .select(&selector)
        .find(|el| {
            el.value()
                .attr("name")
                .is_some_and(|name| name.eq_ignore_ascii_case("description"))
        })
        .and_then(|el| el.value().attr("content"))
        .map(str::trim)
        .filter(|content| !content.is_empty())
        .map(str::to_owned)
}

fn first_paragraph(document: &Html) -> Option<String> {
    let Ok(selector) = Selector::parse("p") else {
        return None;
    };
    let paragraph = document.select(&selector).next()?;
    let text = paragraph
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    Some(text)
}

fn date_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"(\d{4})-(\d{2})-(\d{2})").ok())
        .as_ref()
}

/// Find the first valid `YYYY-MM-DD` calendar date anywhere in `text`.
///
/// Digit sequences that look like dates but are not (e.g. `2024-13-45`)
/// are skipped.
pub fn find_date(text: &str) -> Option<NaiveDate> {
    date_pattern()?.captures_iter(text).find_map(|cap| {
        let year = cap.get(1)?.as_str().parse().ok()?;
        let month = cap.get(2)?.as_str().parse().ok()?;
        let day = cap.get(3)?.as_str().parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    })
}

/// Returns `true` if `date` lies more than `recency_days` days before `today`.
///
/// Dates in the future are never stale.
pub fn is_stale(date: NaiveDate, today: NaiveDate, recency_days: i64) -> bool {
    (today - date).num_days() > recency_days
}
