//! Text-generation backends.

pub mod ollama;

use async_trait::async_trait;

use crate::error::Result;

pub use ollama::OllamaProvider;

/// A synchronous-per-call text-generation service.
///
/// Each call sends one prompt and waits for the full, non-streamed answer.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Model the provider sends requests to.
    fn model(&self) -> &str;
}
