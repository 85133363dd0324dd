//! Random-by-genre resolution over a scraped listing page.
//!
//! The listing collaborator fetches the raw HTML of a genre search page;
//! this module extracts the candidate title ids and picks one. Every
//! failure mode (missing markup, zero entries) is a recoverable error that
//! the controller turns into a "try again" message.

use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;

use crate::error::{BotError, Result};

/// Titles per listing page; parsing never returns more than this.
pub const LISTING_PAGE_SIZE: usize = 50;

static LISTING_TITLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<span class="lister-item-header">.*?<a href="/title/tt(\d+)/"#)
        .expect("listing title regex should compile")
});

/// Extracts up to [`LISTING_PAGE_SIZE`] title ids from a listing page.
///
/// Entries whose markup is missing the title link simply don't match and
/// are skipped.
pub fn parse_listing(html: &str) -> Vec<String> {
    LISTING_TITLE_RE
        .captures_iter(html)
        .take(LISTING_PAGE_SIZE)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Picks one title id uniformly at random from a listing page.
pub fn pick_random_id(html: &str, rng: &mut impl Rng) -> Result<String> {
    let ids = parse_listing(html);
    if ids.is_empty() {
        return Err(BotError::parse("genre listing", "no title entries found"));
    }
    let index = rng.gen_range(0..ids.len());
    Ok(ids[index].clone())
}

/// Chooses the 1-based start offset of one of the two listing pages the
/// bot samples from (entries 1-50 or 51-100).
pub fn random_start_offset(rng: &mut impl Rng) -> usize {
    rng.gen_range(0..2) * LISTING_PAGE_SIZE + 1
}
