//! Callback-button actions and their wire format.
//!
//! Button payloads travel through the transport as opaque strings. They are
//! parsed into [`CallbackAction`] once, at the transport boundary, so the
//! controller never does prefix matching on raw strings.

use std::fmt;

/// Everything a button press can ask the bot to do.
///
/// The wire format is prefix-based: `Movie_<id>`, `Cast_<id>`,
/// `Synopsis_<id>`, `show_synopsis_<id>`, `Trailers_<id>`, `Genre_<label>`,
/// `genres_page_<n>`, and the literals `cancel_search` / `cancel_synopsis`.
/// Title ids are IMDb numeric ids, so they never contain the `_` delimiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    /// Render the detail block for a movie.
    Movie(String),
    /// Render the cast list for a movie.
    Cast(String),
    /// Ask for spoiler confirmation before showing the synopsis.
    Synopsis(String),
    /// Confirmed: fetch and show the synopsis.
    ShowSynopsis(String),
    /// Declined: drop the spoiler confirmation prompt.
    CancelSynopsis,
    /// Render the trailer search results for a movie.
    Trailers(String),
    /// Pick a random movie of the given genre label.
    Genre(String),
    /// Switch the genre menu to page `n` (1-based, as on the wire).
    GenresPage(usize),
    /// Cancel the current search and re-show the main menu.
    CancelSearch,
}

impl CallbackAction {
    /// Serializes the action into its wire payload.
    pub fn encode(&self) -> String {
        match self {
            Self::Movie(id) => format!("Movie_{id}"),
            Self::Cast(id) => format!("Cast_{id}"),
            Self::Synopsis(id) => format!("Synopsis_{id}"),
            Self::ShowSynopsis(id) => format!("show_synopsis_{id}"),
            Self::CancelSynopsis => "cancel_synopsis".to_string(),
            Self::Trailers(id) => format!("Trailers_{id}"),
            Self::Genre(label) => format!("Genre_{label}"),
            Self::GenresPage(page) => format!("genres_page_{page}"),
            Self::CancelSearch => "cancel_search".to_string(),
        }
    }

    /// Parses a wire payload back into an action.
    ///
    /// Returns `None` for payloads this bot never produced; the controller
    /// decides what to do with those.
    pub fn parse(data: &str) -> Option<Self> {
        if let Some(id) = data.strip_prefix("show_synopsis_") {
            return Some(Self::ShowSynopsis(id.to_string()));
        }
        if let Some(page) = data.strip_prefix("genres_page_") {
            return page.parse().ok().map(Self::GenresPage);
        }
        if let Some(id) = data.strip_prefix("Movie_") {
            return Some(Self::Movie(id.to_string()));
        }
        if let Some(id) = data.strip_prefix("Cast_") {
            return Some(Self::Cast(id.to_string()));
        }
        if let Some(id) = data.strip_prefix("Synopsis_") {
            return Some(Self::Synopsis(id.to_string()));
        }
        if let Some(id) = data.strip_prefix("Trailers_") {
            return Some(Self::Trailers(id.to_string()));
        }
        if let Some(label) = data.strip_prefix("Genre_") {
            return Some(Self::Genre(label.to_string()));
        }
        match data {
            "cancel_synopsis" => Some(Self::CancelSynopsis),
            "cancel_search" => Some(Self::CancelSearch),
            _ => None,
        }
    }
}

impl fmt::Display for CallbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
