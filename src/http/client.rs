use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;

use crate::config::ScraperSettings;
use crate::errors::with_fetch_context;
use crate::rate_limiter::RateLimiter;

/// HTTP client that spaces its requests through a [`RateLimiter`]
pub struct RateLimitedClient {
    client: Client,
    rate_limiter: RateLimiter,
}

impl RateLimitedClient {
    pub fn new(settings: &ScraperSettings) -> Result<Self> {
        Ok(Self {
            client: Self::build_client(settings.user_agent, settings.timeout_secs)?,
            rate_limiter: RateLimiter::new(settings.rate_limit_ms),
        })
    }

    /// GET a page and return its body; non-success statuses are errors
    pub async fn get_text(&mut self, url: &str) -> Result<String> {
        self.rate_limiter.wait().await;

        let response = with_fetch_context(self.client.get(url).send().await, url)?;
        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("HTTP error {} for {}", status, url);
        }

        response.text().await.context("Failed to read response body")
    }

    fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")
    }
}
