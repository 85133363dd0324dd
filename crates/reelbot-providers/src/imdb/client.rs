//! HTTP client for the metadata lookups and genre listings.

use async_trait::async_trait;

use reelbot_core::collaborators::{GenreListing, MetadataProvider};
use reelbot_core::{BotError, CastEntry, MovieDetail, MovieSummary, Result};

use super::pages;
use super::suggestion;

const DEFAULT_SUGGESTION_BASE: &str = "https://v3.sg.media-imdb.com";
const DEFAULT_SITE_BASE: &str = "https://www.imdb.com";

/// The site serves scrapers a reduced page without a browser user agent.
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/119.0";

/// Metadata lookup backed by the suggestion API and page scraping.
pub struct ImdbClient {
    client: reqwest::Client,
    suggestion_base: String,
    site_base: String,
}

impl ImdbClient {
    pub fn new() -> Self {
        Self::with_bases(DEFAULT_SUGGESTION_BASE, DEFAULT_SITE_BASE)
    }

    /// Overrides the endpoint bases (tests, mirrors).
    pub fn with_bases(
        suggestion_base: impl Into<String>,
        site_base: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            suggestion_base: suggestion_base.into(),
            site_base: site_base.into(),
        }
    }

    async fn fetch_text(&self, url: &str, what: &'static str) -> Result<String> {
        tracing::debug!(url, what, "fetching");
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(|err| BotError::lookup(format!("{what} request failed: {err}")))?;
        let status = response.status();
        if !status.is_success() {
            return Err(BotError::lookup(format!("{what} request returned {status}")));
        }
        response
            .text()
            .await
            .map_err(|err| BotError::lookup(format!("{what} body read failed: {err}")))
    }
}

impl Default for ImdbClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MetadataProvider for ImdbClient {
    async fn search_titles(&self, query: &str, limit: usize) -> Result<Vec<MovieSummary>> {
        let url = format!(
            "{}{}",
            self.suggestion_base,
            suggestion::suggestion_path(query)
        );
        let body = self.fetch_text(&url, "title search").await?;
        suggestion::summaries_from_suggestions(&body, limit)
    }

    async fn detail(&self, id: &str) -> Result<MovieDetail> {
        let url = format!("{}/title/tt{id}/", self.site_base);
        let html = self.fetch_text(&url, "title page").await?;
        pages::detail_from_title_page(&html)
    }

    async fn cast(&self, id: &str) -> Result<Vec<CastEntry>> {
        let url = format!("{}/title/tt{id}/fullcredits/", self.site_base);
        let html = self.fetch_text(&url, "full credits").await?;
        Ok(pages::cast_from_fullcredits(&html))
    }

    async fn synopsis(&self, id: &str) -> Result<Option<String>> {
        let url = format!("{}/title/tt{id}/plotsummary/", self.site_base);
        let html = self.fetch_text(&url, "plot summary").await?;
        Ok(pages::synopsis_from_plot_page(&html))
    }

    async fn release_dates(&self, id: &str) -> Result<Vec<String>> {
        let url = format!("{}/title/tt{id}/releaseinfo/", self.site_base);
        let html = self.fetch_text(&url, "release info").await?;
        Ok(pages::release_dates_from_page(&html))
    }
}

#[async_trait]
impl GenreListing for ImdbClient {
    async fn fetch_listing_page(&self, slug: &str, start: usize) -> Result<String> {
        let url = format!(
            "{}/search/title/?title_type=feature&genres={slug}&view=simple&start={start}&explore=genres",
            self.site_base
        );
        self.fetch_text(&url, "genre listing").await
    }
}
