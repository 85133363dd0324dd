//! Movie domain model.
//!
//! Plain data carried between the collaborators and the formatters. Every
//! attribute that the metadata source may omit is an `Option`; an absent
//! field is a normal value here, never an error.

use serde::{Deserialize, Serialize};

/// One hit from a title search, rendered as a single selection button.
///
/// Lives only as long as the selection menu it is rendered into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSummary {
    /// Button label, `Title (Year)` when the year is known.
    pub display_title: String,
    /// Canonical title id (IMDb numeric id without the `tt` prefix).
    pub id: String,
}

/// Full metadata record for a single movie.
///
/// Constructed fresh per request and never cached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    /// Primary title, plus the original title when it is distinct.
    ///
    /// Invariant: one or two entries; a second entry equal to the first
    /// after trimming is dropped.
    pub titles: Vec<String>,
    pub year: Option<i32>,
    pub countries: Option<String>,
    pub directors: Option<String>,
    pub genres: Option<String>,
    pub rating: Option<f64>,
    pub plot: Option<String>,
    pub cover_url: Option<String>,
}

impl MovieDetail {
    /// The title shown on the `Title:` line.
    pub fn primary_title(&self) -> &str {
        self.titles.first().map(String::as_str).unwrap_or_default()
    }

    /// The original title, when distinct from the primary one after trimming.
    pub fn original_title(&self) -> Option<&str> {
        let primary = self.primary_title().trim();
        self.titles
            .get(1)
            .map(String::as_str)
            .filter(|original| original.trim() != primary)
    }

    /// Appends `title` as the original title unless it duplicates the
    /// primary title after trimming.
    pub fn push_distinct_title(&mut self, title: impl Into<String>) {
        let title = title.into();
        if self.titles.len() < 2
            && self
                .titles
                .first()
                .is_none_or(|primary| primary.trim() != title.trim())
        {
            self.titles.push(title);
        }
    }
}

/// One credited cast member.
///
/// Rows the source could not fully parse are dropped before they get here,
/// so `name` is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastEntry {
    pub name: String,
    /// Character played, when credited.
    pub role: Option<String>,
    /// Credit note such as `(uncredited)` or `(voice)`.
    pub note: Option<String>,
}

/// One hit from the video-search collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoResult {
    pub title: String,
    pub link: String,
}
