//! Retrying web page fetcher.
//!
//! `PageSource` abstracts the network for testability.
//! `HttpSource` performs real GET requests through reqwest.
//! `Fetcher` owns the bounded retry loop and turns HTML into flattened text.

pub mod extract;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::FetchConfig;
use crate::error::{PromptCacheError, Result};
use crate::utils::take_chars;

pub use extract::html_to_text;

/// Retrieves the raw body of a page. A single call is a single attempt.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageSource: Send + Sync {
    /// GET `url` and return the response body, or a [`PromptCacheError::Fetch`].
    async fn get(&self, url: &str) -> Result<String>;
}

/// [`PageSource`] backed by a reqwest client with a fixed request timeout.
pub struct HttpSource {
    client: Client,
    user_agent: String,
}

impl HttpSource {
    pub fn new(timeout: Duration, user_agent: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PromptCacheError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            user_agent: user_agent.into(),
        })
    }

    pub fn from_config(config: &FetchConfig) -> Result<Self> {
        Self::new(
            Duration::from_secs(config.timeout_secs),
            config.user_agent.clone(),
        )
    }
}

#[async_trait]
impl PageSource for HttpSource {
    async fn get(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| PromptCacheError::Fetch(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PromptCacheError::Fetch(format!("HTTP {}", status)));
        }

        response
            .text()
            .await
            .map_err(|e| PromptCacheError::Fetch(format!("Failed to read body: {}", e)))
    }
}

/// Fetches a page with a fixed-delay retry loop and cleans it to text.
pub struct Fetcher<S> {
    source: S,
    retries: u32,
    retry_delay: Duration,
}

impl<S: PageSource> Fetcher<S> {
    /// `retries` is the total number of attempts. Zero makes no request and
    /// fails straight away.
    pub fn new(source: S, retries: u32, retry_delay: Duration) -> Self {
        Self {
            source,
            retries,
            retry_delay,
        }
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// Fetch `url` and return its readable text, truncated to `content_limit`
    /// characters when a limit is given.
    ///
    /// Sleeps `retry_delay` after every failed attempt except the last one.
    /// Returns [`PromptCacheError::FetchExhausted`] once all attempts fail.
    pub async fn fetch_article_content(
        &self,
        url: &str,
        content_limit: Option<usize>,
    ) -> Result<String> {
        let mut last_error = String::from("no attempts made");

        for attempt in 1..=self.retries {
            match self.source.get(url).await {
                Ok(body) => {
                    let text = html_to_text(&body);
                    let text = match content_limit {
                        Some(limit) => take_chars(&text, limit).to_string(),
                        None => text,
                    };
                    info!(url, attempt, chars = text.chars().count(), "Fetched document");
                    return Ok(text);
                }
                Err(e) => {
                    last_error = e.to_string();
                    if attempt == self.retries {
                        warn!(
                            url,
                            attempt,
                            max_attempts = self.retries,
                            error = %e,
                            "Fetch failed, giving up"
                        );
                        break;
                    }
                    warn!(
                        url,
                        attempt,
                        max_attempts = self.retries,
                        error = %e,
                        "Fetch failed, retrying"
                    );
                    if !self.retry_delay.is_zero() {
                        debug!(delay_ms = self.retry_delay.as_millis() as u64, "Waiting before retry");
                        tokio::time::sleep(self.retry_delay).await;
                    }
                }
            }
        }

        Err(PromptCacheError::FetchExhausted {
            url: url.to_string(),
            attempts: self.retries,
            last_error,
        })
    }
}
