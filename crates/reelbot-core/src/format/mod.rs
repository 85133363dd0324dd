//! Formatters turning raw metadata into styled message text.
//!
//! Each formatter is a pure function over the domain model; anything the
//! source omitted is simply left out of the output, with no placeholder
//! lines.

mod cast;
mod detail;
mod synopsis;
mod trailers;

pub use cast::{NOTABLE_CAST_LIMIT, format_cast};
pub use detail::format_detail;
pub use synopsis::{NO_SYNOPSIS, format_synopsis};
pub use trailers::{TRAILER_RESULT_LIMIT, format_trailers, trailer_query};

use once_cell::sync::Lazy;
use regex::Regex;

static RELEASE_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{1,2}\s[a-zA-Z]{3,9}\s\d{4}").expect("release date regex should compile"));

/// Extracts a release year from extended release-date strings.
///
/// Takes the first string containing a `D MonthName YYYY` date and returns
/// its four-digit year. Strings that don't parse are skipped; if none
/// parse, the year stays absent.
pub fn year_from_release_dates(dates: &[String]) -> Option<i32> {
    for date in dates {
        if let Some(found) = RELEASE_DATE_RE.find(date) {
            let text = found.as_str();
            if let Ok(year) = text[text.len() - 4..].parse() {
                return Some(year);
            }
        }
    }
    None
}
