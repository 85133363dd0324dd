//! The synopsis block.

use crate::markup;

/// Shown when the source has no synopsis for a title.
pub const NO_SYNOPSIS: &str = "It looks like we don't have a synopsis for this title yet 😞";

/// Formats the synopsis, or the fixed "none available" message.
///
/// The controller only calls this after the user confirmed the spoiler
/// warning.
pub fn format_synopsis(synopsis: Option<&str>) -> String {
    match synopsis {
        Some(text) if !text.trim().is_empty() => {
            format!("{}:\n\n{}", markup::bold("Synopsis"), markup::escape(text))
        }
        _ => NO_SYNOPSIS.to_string(),
    }
}
