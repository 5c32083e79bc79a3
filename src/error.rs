//! Error types for promptcache.

use thiserror::Error;

/// Errors produced by the fetcher, the model client and configuration loading.
#[derive(Debug, Error)]
pub enum PromptCacheError {
    /// Invalid or unreadable configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A single fetch attempt failed (network, status, or body).
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Every fetch attempt failed.
    #[error("Failed to fetch content from {url} after {attempts} attempt(s): {last_error}")]
    FetchExhausted {
        url: String,
        attempts: u32,
        last_error: String,
    },

    /// The text-generation service failed or returned a malformed response.
    #[error("Provider error: {0}")]
    Provider(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PromptCacheError>;
