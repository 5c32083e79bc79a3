//! Configuration for promptcache.
//!
//! Loaded from `~/.promptcache/config.toml` (or an explicit path). Every field
//! has a default, so a missing file or a partial one is valid. Environment
//! variables override the file; CLI flags override both.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PromptCacheError, Result};

/// Page fetched when no URL is configured.
pub const DEFAULT_URL: &str = "https://www.deeplearningbook.org/contents/intro.html";
/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemma3:1b";
/// Local Ollama endpoint.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fetch: FetchConfig,
    pub model: ModelConfig,
    pub prompt: PromptConfig,
    pub cache: CacheConfig,
    pub logging: LoggingConfig,
}

/// Fetcher settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Page to summarize.
    pub url: String,
    /// Total attempts before giving up.
    pub retries: u32,
    /// Fixed delay between attempts.
    pub retry_delay_ms: u64,
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// Maximum characters kept from the cleaned page. `None` keeps everything.
    pub content_limit: Option<usize>,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            retries: 3,
            retry_delay_ms: 2000,
            timeout_secs: 30,
            content_limit: Some(200_000),
            user_agent: format!("promptcache/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Text-generation service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub name: String,
    pub base_url: String,
    /// Request timeout for the model call. Unset means wait indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_OLLAMA_URL.to_string(),
            timeout_secs: None,
        }
    }
}

/// Prompt construction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// Characters of page text embedded in the prompt.
    pub excerpt_chars: usize,
    /// Characters of the final answer printed.
    pub preview_chars: usize,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            excerpt_chars: 8000,
            preview_chars: 300,
        }
    }
}

/// Cache write policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Store responses that are empty or whitespace-only.
    pub store_empty: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { store_empty: true }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl Config {
    /// Default config file location: `~/.promptcache/config.toml`.
    pub fn path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".promptcache")
            .join("config.toml")
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(data) => Self::from_toml(&data).map_err(|e| {
                PromptCacheError::Config(format!("{}: {}", path.display(), e))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Parse TOML text.
    pub fn from_toml(data: &str) -> Result<Self> {
        toml::from_str(data).map_err(|e| PromptCacheError::Config(e.to_string()))
    }

    /// Load from `path` (or the default path), then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::path);
        let mut config = Self::load_from_path(&path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply `PROMPTCACHE_URL`, `PROMPTCACHE_MODEL` and `OLLAMA_HOST`.
    ///
    /// Takes a lookup function so callers (and tests) control the source.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty("PROMPTCACHE_URL") {
            self.fetch.url = url;
        }
        if let Some(model) = non_empty("PROMPTCACHE_MODEL") {
            self.model.name = model;
        }
        if let Some(host) = non_empty("OLLAMA_HOST") {
            self.model.base_url = normalize_ollama_host(&host);
        }
    }
}

/// `OLLAMA_HOST` is often given as `host:port` without a scheme.
fn normalize_ollama_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("http://{}", host)
    }
}
