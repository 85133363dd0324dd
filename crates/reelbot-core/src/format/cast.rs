//! The cast list block.

use crate::markup;
use crate::model::CastEntry;

/// Cast entries shown before the list is cut off with a "full cast" link.
pub const NOTABLE_CAST_LIMIT: usize = 30;

/// Formats the cast list for one movie.
///
/// Lists at most [`NOTABLE_CAST_LIMIT`] entries; when the list is longer
/// the header switches to "first roles" and a link to the full credits
/// page is appended. Entries are numbered sequentially over what is shown.
pub fn format_cast(cast: &[CastEntry], id: &str) -> String {
    let truncated = cast.len() > NOTABLE_CAST_LIMIT;
    let shown = if truncated {
        &cast[..NOTABLE_CAST_LIMIT]
    } else {
        cast
    };

    let mut out = if truncated {
        format!("{} (first roles):\n\n", markup::bold("Cast"))
    } else {
        format!("{}:\n\n", markup::bold("Cast"))
    };

    for (index, entry) in shown.iter().enumerate() {
        out.push_str(&format!(
            "{}. {}",
            index + 1,
            markup::bold(&markup::escape(&entry.name))
        ));
        if let Some(role) = entry.role.as_deref().map(str::trim).filter(|r| !r.is_empty()) {
            out.push_str(&format!(" as {}", markup::escape(role)));
        }
        if let Some(note) = entry.note.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            let note = if !note.starts_with('(') && !note.ends_with(')') {
                format!("({})", markup::escape(note))
            } else {
                markup::escape(note)
            };
            out.push_str(&format!(" {note}"));
        }
        out.push('\n');
    }

    if truncated {
        let url = format!("https://www.imdb.com/title/tt{id}/fullcredits/");
        out.push_str(&format!(
            "\nYou can see the full cast and crew {}. ",
            markup::link("here", &url)
        ));
    }
    out
}
