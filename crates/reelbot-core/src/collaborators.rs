//! Traits for the external services the bot depends on.
//!
//! Implementations live in `reelbot-providers`; tests substitute mocks.
//! Every method reports failure through [`crate::BotError`], which the
//! controller converts into a user-visible "try again" message — external
//! failures never take the session down.

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{CastEntry, MovieDetail, MovieSummary, VideoResult};

/// Movie-metadata lookup service.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Searches titles matching a free-text query.
    ///
    /// Returns at most `limit` hits, possibly none; an empty result is not
    /// an error.
    async fn search_titles(&self, query: &str, limit: usize) -> Result<Vec<MovieSummary>>;

    /// Fetches the full metadata record for one title.
    async fn detail(&self, id: &str) -> Result<MovieDetail>;

    /// Fetches the credited cast, in billing order.
    async fn cast(&self, id: &str) -> Result<Vec<CastEntry>>;

    /// Fetches the synopsis, when the source has one.
    async fn synopsis(&self, id: &str) -> Result<Option<String>>;

    /// Fetches extended release-date strings (used as the year fallback
    /// when the detail record carries no year).
    async fn release_dates(&self, id: &str) -> Result<Vec<String>>;
}

/// Fetches raw genre listing pages for the random pick.
#[async_trait]
pub trait GenreListing: Send + Sync {
    /// Returns the HTML of the listing page for `slug` starting at the
    /// 1-based entry offset `start`.
    async fn fetch_listing_page(&self, slug: &str, start: usize) -> Result<String>;
}

/// Web video search used for trailer lookup.
#[async_trait]
pub trait VideoSearch: Send + Sync {
    /// Returns up to `limit` search hits, best match first.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<VideoResult>>;
}
