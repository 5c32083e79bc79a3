//! Command-line interface.

mod run;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use promptcache::config::{Config, LogFormat};

pub(crate) use run::cmd_run;

/// Summarize a web page with a local model, then show the prompt cache at work.
#[derive(Debug, Parser)]
#[command(name = "promptcache", version, about)]
pub(crate) struct Cli {
    /// Page to fetch and summarize.
    #[arg(long)]
    pub url: Option<String>,

    /// Ollama model name.
    #[arg(long)]
    pub model: Option<String>,

    /// Ollama base URL.
    #[arg(long, value_name = "URL")]
    pub ollama_url: Option<String>,

    /// Fetch attempts before giving up.
    #[arg(long)]
    pub retries: Option<u32>,

    /// Maximum characters kept from the fetched page.
    #[arg(long, value_name = "CHARS")]
    pub content_limit: Option<usize>,

    /// Characters of page text embedded in the prompt.
    #[arg(long, value_name = "CHARS")]
    pub excerpt_chars: Option<usize>,

    /// Config file (default: ~/.promptcache/config.toml).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log output format.
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormatArg>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum LogFormatArg {
    Pretty,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

impl Cli {
    /// Flags win over file and environment values.
    pub(crate) fn apply_to(&self, config: &mut Config) {
        if let Some(url) = &self.url {
            config.fetch.url = url.clone();
        }
        if let Some(model) = &self.model {
            config.model.name = model.clone();
        }
        if let Some(base_url) = &self.ollama_url {
            config.model.base_url = base_url.clone();
        }
        if let Some(retries) = self.retries {
            config.fetch.retries = retries;
        }
        if let Some(limit) = self.content_limit {
            config.fetch.content_limit = Some(limit);
        }
        if let Some(excerpt) = self.excerpt_chars {
            config.prompt.excerpt_chars = excerpt;
        }
        if let Some(format) = self.log_format {
            config.logging.format = format.into();
        }
    }
}

/// Install the global tracing subscriber. Logs go to stderr; stdout carries results.
pub(crate) fn init_logging(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("promptcache=info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.with_target(false).init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_keeps_config() {
        let cli = Cli::parse_from(["promptcache"]);
        let mut config = Config::default();
        cli.apply_to(&mut config);
        assert_eq!(config.fetch.retries, 3);
        assert_eq!(config.prompt.excerpt_chars, 8000);
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "promptcache",
            "--url",
            "https://example.com",
            "--model",
            "llama3.2",
            "--retries",
            "5",
            "--content-limit",
            "1000",
            "--excerpt-chars",
            "500",
            "--log-format",
            "json",
        ]);
        let mut config = Config::default();
        cli.apply_to(&mut config);
        assert_eq!(config.fetch.url, "https://example.com");
        assert_eq!(config.model.name, "llama3.2");
        assert_eq!(config.fetch.retries, 5);
        assert_eq!(config.fetch.content_limit, Some(1000));
        assert_eq!(config.prompt.excerpt_chars, 500);
        assert_eq!(config.logging.format, LogFormat::Json);
    }
}
