//! Main scraper API for vlr.gg
//!
//! Combines the HTTP client with the parsers: name → profile URL →
//! per-agent statistics.

use tracing::{error, info, instrument, warn};

use crate::client::{ClientConfig, VlrClient};
use crate::error::{Result, VlrError};
use crate::parser::{parse_player_link, parse_player_profile};
use crate::types::PlayerResult;
use crate::url::{build_profile_url, build_search_path, with_all_time_span};

/// Main scraper API for vlr.gg
///
/// Both lookups report "nothing there" as `Ok(None)` and keep errors for
/// network failures and tables that do not match the expected layout.
#[derive(Debug, Clone)]
pub struct VlrScraper {
    client: VlrClient,
}

impl VlrScraper {
    /// Create a new scraper with default configuration
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn new() -> Result<Self> {
        let client = VlrClient::new()?;
        Ok(Self { client })
    }

    /// Create a new scraper with custom client configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = VlrClient::with_config(config)?;
        Ok(Self { client })
    }

    /// Resolve a player name to the absolute URL of their profile
    ///
    /// Searches the players category and takes the first hit.
    ///
    /// # Returns
    /// `Some(url)`, or `None` when the search has no player result or the
    /// result page cannot be parsed
    ///
    /// # Errors
    /// - `InvalidName` if the name is empty or whitespace only
    /// - `HttpError` / `Status` if the search request fails
    ///
    /// # Example
    /// ```no_run
    /// # async fn example() -> vlrstats_core::Result<()> {
    /// use vlrstats_core::VlrScraper;
    /// let scraper = VlrScraper::new()?;
    /// if let Some(url) = scraper.resolve_player("TenZ").await? {
    ///     println!("profile: {}", url);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self))]
    pub async fn resolve_player(&self, name: &str) -> Result<Option<String>> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(VlrError::InvalidName(
                "Player name cannot be empty".to_string(),
            ));
        }

        let path = build_search_path(trimmed);
        let html = self.client.fetch(&path).await.inspect_err(|e| {
            error!(error = %e, "failed to retrieve search page");
        })?;

        match parse_player_link(&html) {
            Ok(Some(href)) => {
                let url = build_profile_url(self.client.base_url(), &href);
                info!(profile = %url, "found player profile");
                Ok(Some(url))
            }
            Ok(None) => {
                warn!("player not found in the players category");
                Ok(None)
            }
            Err(e) => {
                error!(error = %e, "error parsing search results");
                Ok(None)
            }
        }
    }

    /// Fetch the all-time per-agent statistics from a profile URL
    ///
    /// # Returns
    /// `Some(PlayerResult)`, or `None` if the page has no stats table
    ///
    /// # Errors
    /// - `HttpError` / `Status` if the request fails
    /// - `MalformedRow` if a stats row lacks one of the fixed columns
    #[instrument(skip(self))]
    pub async fn fetch_player(&self, profile_url: &str) -> Result<Option<PlayerResult>> {
        let url = with_all_time_span(profile_url);
        let html = self.client.fetch_url(&url).await?;

        match parse_player_profile(&html) {
            Ok(Some(result)) => {
                info!(player = %result.name, agents = result.stats.len(), "parsed stats table");
                Ok(Some(result))
            }
            Ok(None) => {
                warn!("stats table not found");
                Ok(None)
            }
            Err(e) => {
                error!(error = %e, "error processing player");
                Err(e)
            }
        }
    }
}
