use chrono::{DateTime, NaiveDate};
use scraper::Html;

/// Excerpt length used when callers have no better idea.
pub const DEFAULT_TRUNCATE_LENGTH: usize = 150;

/// Shown in place of a date that could not be parsed.
pub const UNKNOWN_DATE: &str = "Unknown date";

const ELLIPSIS: &str = "...";

/// Extract the visible text of an HTML fragment.
///
/// Tags are dropped and entities decoded; whitespace is left as-is.
pub fn strip_markup(raw: &str) -> String {
    let fragment = Html::parse_fragment(raw);
    fragment.root_element().text().collect()
}

/// Collapse whitespace and cut to `max_length` characters, appending an
/// ellipsis when anything was removed. The cut is not word-aware.
pub fn truncate(text: &str, max_length: usize) -> String {
    let cleaned = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.chars().count() <= max_length {
        return cleaned;
    }

    let cut: String = cleaned.chars().take(max_length).collect();
    format!("{}{}", cut.trim(), ELLIPSIS)
}

/// Render a feed date as e.g. "September 1, 2025".
///
/// Accepts RFC 3339, RFC 2822 (RSS `pubDate`) and bare `YYYY-MM-DD` dates.
/// The calendar day is taken in the timestamp's own offset.
pub fn format_date(date_text: &str) -> String {
    let date_text = date_text.trim();

    let date = DateTime::parse_from_rfc3339(date_text)
        .or_else(|_| DateTime::parse_from_rfc2822(date_text))
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDate::parse_from_str(date_text, "%Y-%m-%d"));

    match date {
        Ok(date) => date.format("%B %-d, %Y").to_string(),
        Err(_) => UNKNOWN_DATE.to_string(),
    }
}
