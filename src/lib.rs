//! promptcache: an exact-match prompt cache in front of a local LLM.
//!
//! A [`fetch::Fetcher`] retrieves a web page and flattens it to text, the
//! [`prompt`] module wraps an excerpt in a summary template, and the
//! [`inference`] wrappers call a [`providers::TextGenerator`] either directly
//! or through a [`cache::PromptCache`].
//!
//! ```
//! use async_trait::async_trait;
//! use promptcache::{cached_inference, CacheOutcome, CachePolicy, MemoryCache, TextGenerator};
//!
//! struct Shout;
//!
//! #[async_trait]
//! impl TextGenerator for Shout {
//!     async fn generate(&self, prompt: &str) -> promptcache::Result<String> {
//!         Ok(prompt.to_uppercase())
//!     }
//!     fn name(&self) -> &str { "shout" }
//!     fn model(&self) -> &str { "shout" }
//! }
//!
//! # tokio_test::block_on(async {
//! let mut cache = MemoryCache::new();
//! let first = cached_inference(&Shout, "hi", &mut cache, CachePolicy::default()).await.unwrap();
//! let second = cached_inference(&Shout, "hi", &mut cache, CachePolicy::default()).await.unwrap();
//! assert_eq!(first.outcome, CacheOutcome::Miss);
//! assert_eq!(second.text, "HI");
//! assert_eq!(second.elapsed_secs(), 0.0);
//! # });
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod inference;
pub mod pipeline;
pub mod prompt;
pub mod providers;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use cache::{CacheStats, MemoryCache, PromptCache};
pub use config::Config;
pub use error::{PromptCacheError, Result};
pub use fetch::{Fetcher, HttpSource, PageSource};
pub use inference::{cached_inference, uncached_inference, CacheOutcome, CachePolicy, Inference};
pub use pipeline::{run_summary, SummaryReport};
pub use providers::{OllamaProvider, TextGenerator};
