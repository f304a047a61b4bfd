use feed_rs::model::Entry;
use feed_rs::parser;
use tracing::debug;

use crate::post::{PostRecord, MAX_POSTS};

/// Parse raw feed markup into at most [`MAX_POSTS`] posts, in document order.
///
/// Never fails: markup that cannot be parsed, or a feed without items,
/// yields an empty vector and the caller decides what to do with that.
pub fn parse(raw: &[u8]) -> Vec<PostRecord> {
    let feed = match parser::parse(raw) {
        Ok(feed) => feed,
        Err(e) => {
            debug!("Feed markup could not be parsed: {}", e);
            return Vec::new();
        }
    };

    // feed-rs normalizes dates to UTC, so keep the source text when the
    // raw item blocks line up with the parsed entries
    let mut raw_dates = raw_item_dates(raw);
    if raw_dates.len() != feed.entries.len() {
        raw_dates.clear();
    }

    feed.entries
        .into_iter()
        .take(MAX_POSTS)
        .enumerate()
        .map(|(i, entry)| {
            let raw_date = raw_dates.get_mut(i).and_then(Option::take);
            post_from_entry(entry, raw_date)
        })
        .collect()
}

/// Publication date text of each `<item>` (or Atom `<entry>`), in document order.
pub fn raw_item_dates(raw: &[u8]) -> Vec<Option<String>> {
    let xml = match std::str::from_utf8(raw) {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    let (tag, date_tags): (&str, &[&str]) = if xml.contains("<item") {
        ("item", &["pubDate"])
    } else {
        ("entry", &["published", "updated"])
    };
    let start_tag = format!("<{}", tag);
    let end_tag = format!("</{}>", tag);

    xml.split(start_tag.as_str())
        .skip(1)
        .filter(|block| block.starts_with(|c: char| c == '>' || c.is_whitespace()))
        .map(|block| {
            let item_end = block.find(end_tag.as_str()).unwrap_or(block.len());
            let item = &block[..item_end];
            date_tags
                .iter()
                .find_map(|date_tag| extract_xml_element(item, date_tag))
        })
        .collect()
}

pub fn extract_xml_element(xml: &str, tag: &str) -> Option<String> {
    let start_tag = format!("<{}>", tag);
    let end_tag = format!("</{}>", tag);

    let start = xml.find(&start_tag)? + start_tag.len();
    let end = xml[start..].find(&end_tag)? + start;

    let text = xml[start..end].trim();
    let text = text
        .strip_prefix("<![CDATA[")
        .and_then(|t| t.strip_suffix("]]>"))
        .unwrap_or(text);
    Some(text.trim().to_string())
}

fn post_from_entry(entry: Entry, raw_date: Option<String>) -> PostRecord {
    let title = entry
        .title
        .map(|t| t.content.trim().to_string())
        .unwrap_or_default();

    let link = entry
        .links
        .first()
        .map(|l| l.href.trim().to_string())
        .unwrap_or_default();

    let published_at = raw_date
        .or_else(|| entry.published.or(entry.updated).map(|dt| dt.to_rfc3339()))
        .unwrap_or_default();

    let description = entry
        .summary
        .map(|s| s.content.trim().to_string())
        .unwrap_or_default();

    let content = entry
        .content
        .and_then(|c| c.body)
        .map(|body| body.trim().to_string())
        .filter(|body| !body.is_empty())
        .unwrap_or_else(|| description.clone());

    PostRecord::new(title, link, published_at, description).with_content(content)
}
