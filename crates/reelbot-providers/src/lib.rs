//! Network-facing collaborator implementations for Reelbot.
//!
//! [`ImdbClient`] backs the metadata lookups and genre listings by calling
//! the public suggestion API and scraping title pages; [`YoutubeSearch`]
//! backs trailer lookup through the web search endpoint. Both convert
//! every failure into `reelbot_core::BotError` at the call boundary.

pub mod imdb;
pub mod youtube;

pub use imdb::ImdbClient;
pub use youtube::YoutubeSearch;
