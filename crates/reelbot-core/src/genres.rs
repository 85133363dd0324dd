//! The genre catalog and its paginated selection menu.

use crate::callback::CallbackAction;
use crate::transport::{Control, ReplyMarkup};

/// Genre labels offered in the "Pick a movie" menu.
pub const GENRES: [&str; 23] = [
    "Action",
    "Adventure",
    "Animation",
    "Biography",
    "Comedy",
    "Crime",
    "Documentary",
    "Drama",
    "Family",
    "Fantasy",
    "Film Noir",
    "History",
    "Horror",
    "Music",
    "Musical",
    "Mystery",
    "Romance",
    "Sci-Fi",
    "Short Film",
    "Sport",
    "Thriller",
    "War",
    "Western",
];

/// Number of pages in the genre menu.
pub const GENRE_PAGE_COUNT: usize = 4;

const GENRES_PER_PAGE: usize = 6;
const GENRES_PER_ROW: usize = 3;

/// Maps a display label to the listing-page genre slug.
///
/// Two labels have dedicated slugs on the listing site; everything else is
/// just lowercased.
pub fn slug(label: &str) -> String {
    match label {
        "Film Noir" => "film-noir".to_string(),
        "Short Film" => "short".to_string(),
        other => other.to_lowercase(),
    }
}

/// Builds one page of the genre menu.
///
/// Genre buttons come in rows of three. The first page carries only a
/// forward arrow, the last only a back arrow, middle pages both; the
/// navigation payloads are the 1-based target page numbers. Every page ends
/// with a Cancel row.
pub fn genre_page(page: usize) -> ReplyMarkup {
    let page = page.min(GENRE_PAGE_COUNT - 1);
    let mut rows: Vec<Vec<Control>> = Vec::new();

    let start = page * GENRES_PER_PAGE;
    let labels = &GENRES[start..GENRES.len().min(start + GENRES_PER_PAGE)];
    for row in labels.chunks(GENRES_PER_ROW) {
        rows.push(
            row.iter()
                .map(|label| {
                    Control::new(*label, CallbackAction::Genre((*label).to_string()))
                })
                .collect(),
        );
    }

    let nav = match page {
        0 => vec![Control::new("▶️", CallbackAction::GenresPage(2))],
        p if p == GENRE_PAGE_COUNT - 1 => {
            vec![Control::new("◀️", CallbackAction::GenresPage(p))]
        }
        p => vec![
            Control::new("◀", CallbackAction::GenresPage(p)),
            Control::new("▶️", CallbackAction::GenresPage(p + 2)),
        ],
    };
    rows.push(nav);
    rows.push(vec![Control::new("❌ Cancel", CallbackAction::CancelSearch)]);

    ReplyMarkup::Inline(rows)
}
