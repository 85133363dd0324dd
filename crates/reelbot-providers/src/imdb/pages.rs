//! Parsers for the scraped title pages.
//!
//! Each function takes raw page HTML and produces domain values. Rows or
//! fields the markup doesn't carry are skipped or left absent; only a page
//! with no usable structure at all is an error.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use reelbot_core::{BotError, CastEntry, MovieDetail, Result};

static JSON_LD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<script type="application/ld\+json">(.*?)</script>"#)
        .expect("structured data regex should compile")
});

static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]+>").expect("tag strip regex should compile"));

static CAST_ROW_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r#"(?s)<td>\s*<a href="/name/nm\d+[^"]*"[^>]*>(?P<name>.*?)</a>\s*</td>\s*"#,
        r#"<td class="ellipsis">.*?</td>\s*"#,
        r#"<td class="character">(?P<character>.*?)</td>"#,
    ))
    .expect("cast row regex should compile")
});

static SYNOPSIS_ITEM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<li class="ipl-zebra-list__item"[^>]*id="synopsis-[^"]*"[^>]*>(.*?)</li>"#)
        .expect("synopsis item regex should compile")
});

static RELEASE_DATE_CELL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<td class="release-date-item__date"[^>]*>([^<]+)</td>"#)
        .expect("release date cell regex should compile")
});

/// Builds a [`MovieDetail`] from a title page's structured-data block.
///
/// A page without the block, or whose block carries no title, is a parse
/// error; every other field degrades to absent.
pub(crate) fn detail_from_title_page(html: &str) -> Result<MovieDetail> {
    let block = JSON_LD_RE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| BotError::parse("title page", "no structured data block"))?;
    let payload: Value = serde_json::from_str(block.as_str().trim())
        .map_err(|err| BotError::parse("title page", err.to_string()))?;

    let name = payload
        .get("name")
        .and_then(Value::as_str)
        .map(decode_entities)
        .ok_or_else(|| BotError::parse("title page", "structured data has no title"))?;

    let mut detail = MovieDetail {
        titles: vec![name],
        ..Default::default()
    };
    if let Some(original) = payload.get("alternateName").and_then(Value::as_str) {
        detail.push_distinct_title(decode_entities(original));
    }
    if let Some(date) = payload.get("datePublished").and_then(Value::as_str) {
        detail.year = date.get(..4).and_then(|year| year.parse().ok());
    }
    detail.countries = joined_names(payload.get("countryOfOrigin"));
    detail.directors = joined_names(payload.get("director"));
    detail.genres = joined_strings(payload.get("genre"));
    detail.rating = payload
        .get("aggregateRating")
        .and_then(|rating| rating.get("ratingValue"))
        .and_then(lenient_f64);
    detail.plot = payload
        .get("description")
        .and_then(Value::as_str)
        .map(|text| {
            let text = match text.split_once("::") {
                Some((first, _)) => first,
                None => text,
            };
            decode_entities(text.trim())
        });
    detail.cover_url = payload
        .get("image")
        .and_then(Value::as_str)
        .map(str::to_string);
    Ok(detail)
}

/// Extracts cast rows from the full-credits table.
///
/// Rows missing the actor link are simply not matched; rows whose name
/// cleans down to nothing are dropped. An unparseable page yields an empty
/// cast, not an error.
pub(crate) fn cast_from_fullcredits(html: &str) -> Vec<CastEntry> {
    CAST_ROW_RE
        .captures_iter(html)
        .filter_map(|caps| {
            let name = clean_text(&caps["name"]);
            if name.is_empty() {
                return None;
            }
            let (role, note) = split_role_note(&clean_text(&caps["character"]));
            Some(CastEntry { name, role, note })
        })
        .collect()
}

/// Returns the first synopsis entry from the plot-summary page, if any.
pub(crate) fn synopsis_from_plot_page(html: &str) -> Option<String> {
    SYNOPSIS_ITEM_RE
        .captures_iter(html)
        .map(|caps| clean_text(&caps[1]))
        .find(|text| !text.is_empty())
}

/// Returns the release-date strings from the release-info page, in order.
pub(crate) fn release_dates_from_page(html: &str) -> Vec<String> {
    RELEASE_DATE_CELL_RE
        .captures_iter(html)
        .map(|caps| clean_text(&caps[1]))
        .filter(|text| !text.is_empty())
        .collect()
}

/// Splits a character cell into the role and a trailing parenthesized note.
fn split_role_note(cell: &str) -> (Option<String>, Option<String>) {
    let cell = cell.trim();
    if let Some(start) = cell.find('(') {
        if cell.ends_with(')') {
            return (non_empty(&cell[..start]), non_empty(&cell[start..]));
        }
    }
    (non_empty(cell), None)
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Strips tags, decodes common entities and collapses whitespace.
fn clean_text(fragment: &str) -> String {
    let stripped = TAG_RE.replace_all(fragment, " ");
    decode_entities(&stripped)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

fn joined_strings(value: Option<&Value>) -> Option<String> {
    let list = string_list(value?);
    (!list.is_empty()).then(|| list.join(", "))
}

fn joined_names(value: Option<&Value>) -> Option<String> {
    let value = value?;
    let items: Vec<String> = match value {
        Value::Array(items) => items.iter().filter_map(name_of).collect(),
        single => name_of(single).into_iter().collect(),
    };
    (!items.is_empty()).then(|| items.join(", "))
}

fn name_of(value: &Value) -> Option<String> {
    value
        .get("name")
        .and_then(Value::as_str)
        .map(decode_entities)
}

fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::String(text) => vec![decode_entities(text)],
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(decode_entities)
            .collect(),
        _ => Vec::new(),
    }
}

fn lenient_f64(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|text| text.parse().ok()))
}
