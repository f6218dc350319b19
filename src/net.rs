//! HTTP transport shared by every scraper.
//!
//! One [`reqwest::Client`] is built per pipeline run, carrying the fixed
//! User-Agent and the per-request timeout budget. Scrapers only ever see the
//! two fetch shapes they need: text and JSON. Non-2xx responses surface as
//! errors so a scraper can decide whether a failed fetch means "skip the
//! item" or "source unavailable".

use serde_json::Value;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, instrument};

/// User-Agent sent with every request.
pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; techblog-corpus-bot/1.0)";

/// Thin wrapper around a configured [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct Http {
    client: reqwest::Client,
}

impl Http {
    /// Build a client with the given per-request timeout.
    ///
    /// The timeout bounds the whole request (connect through body read), so
    /// a hung endpoint cannot stall a pipeline run indefinitely.
    pub fn new(timeout_secs: u64) -> Result<Self, Box<dyn Error>> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }

    /// Fetch a URL and return the response body as text.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, timeout, or a non-2xx status.
    #[instrument(level = "debug", skip(self))]
    pub async fn get_text(&self, url: &str) -> Result<String, Box<dyn Error>> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        debug!(bytes = body.len(), "Fetched text body");
        Ok(body)
    }

    /// Fetch a URL and parse the response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, timeout, non-2xx status, or a
    /// body that is not valid JSON.
    #[instrument(level = "debug", skip(self))]
    pub async fn get_json(&self, url: &str) -> Result<Value, Box<dyn Error>> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let payload = response.json::<Value>().await?;
        Ok(payload)
    }
}
