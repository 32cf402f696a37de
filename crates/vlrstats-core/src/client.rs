//! HTTP client for vlr.gg
//!
//! Thin wrapper over `reqwest` that always sends a browser header set
//! (the site rejects unrecognized clients) and bounds every request
//! with a timeout.

use std::time::Duration;

use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use tracing::{debug, instrument, warn};

use crate::error::{Result, VlrError};

pub const BASE_URL: &str = "https://www.vlr.gg";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Site origin without trailing slash (default: `https://www.vlr.gg`)
    pub base_url: String,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// User-Agent sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            timeout_secs: 30,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

/// HTTP client wrapper
///
/// Handles all HTTP communication with the stats site:
/// - Browser-like headers (User-Agent, Accept, Accept-Language)
/// - Request and connect timeouts
/// - Non-success statuses turned into [`VlrError::Status`]
#[derive(Debug, Clone)]
pub struct VlrClient {
    client: reqwest::Client,
    base_url: String,
}

impl VlrClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Errors
    /// - `InvalidUrl` - `base_url` is not an http(s) origin
    /// - `HttpError` - the underlying client could not be built
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(VlrError::InvalidUrl(config.base_url));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.timeout_secs.min(10)))
            .user_agent(config.user_agent)
            .cookie_store(true)
            .default_headers(headers)
            .build()
            .map_err(VlrError::HttpError)?;

        Ok(Self { client, base_url })
    }

    /// Site origin used to build search URLs and absolute profile links
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch HTML content from a path on the site
    ///
    /// # Arguments
    /// * `path` - The path to fetch (e.g., "/search/?q=tenz&type=players")
    pub async fn fetch(&self, path: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        self.fetch_url(&url).await
    }

    /// Fetch HTML content from an absolute URL
    ///
    /// # Errors
    /// - `HttpError` - Network errors, timeouts, unreadable body
    /// - `Status` - Any non-2xx response
    #[instrument(skip(self))]
    pub async fn fetch_url(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(VlrError::HttpError)?;

        let status = response.status();
        debug!(status = status.as_u16(), final_url = %response.url(), "response received");

        if !status.is_success() {
            warn!(status = status.as_u16(), "request rejected");
            return Err(VlrError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(VlrError::HttpError)
    }
}
