//! Title search via the suggestion API.
//!
//! The suggestion endpoint returns a compact JSON document whose `d` array
//! mixes titles, people and keywords; only `tt…` entries are movie titles.

use serde::Deserialize;

use reelbot_core::{BotError, MovieSummary, Result};

#[derive(Debug, Deserialize)]
struct SuggestionResponse {
    #[serde(default, rename = "d")]
    entries: Vec<SuggestionEntry>,
}

#[derive(Debug, Deserialize)]
struct SuggestionEntry {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "l")]
    title: Option<String>,
    #[serde(default, rename = "y")]
    year: Option<i32>,
}

/// Builds the request path for a query.
///
/// The API buckets suggestions under the first character of the query;
/// anything non-alphanumeric falls back to the `x` bucket.
pub(crate) fn suggestion_path(query: &str) -> String {
    let normalized = query.trim().to_lowercase();
    let bucket = normalized
        .chars()
        .next()
        .filter(char::is_ascii_alphanumeric)
        .unwrap_or('x');
    format!("/suggestion/{bucket}/{}.json", normalized.replace(' ', "%20"))
}

/// Converts a suggestion response body into search hits.
///
/// Entries that are not titles, or that lack an id or a display title, are
/// skipped. The `tt` prefix is stripped so the rest of the bot deals in
/// bare numeric ids.
pub(crate) fn summaries_from_suggestions(body: &str, limit: usize) -> Result<Vec<MovieSummary>> {
    let response: SuggestionResponse = serde_json::from_str(body)
        .map_err(|err| BotError::parse("suggestion response", err.to_string()))?;

    let mut summaries = Vec::new();
    for entry in response.entries {
        let (Some(id), Some(title)) = (entry.id, entry.title) else {
            continue;
        };
        let Some(digits) = id.strip_prefix("tt") else {
            continue;
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            continue;
        }
        let display_title = match entry.year {
            Some(year) => format!("{title} ({year})"),
            None => title,
        };
        summaries.push(MovieSummary {
            display_title,
            id: digits.to_string(),
        });
        if summaries.len() == limit {
            break;
        }
    }
    Ok(summaries)
}
