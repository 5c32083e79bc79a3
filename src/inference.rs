//! Timed inference wrappers, with and without the prompt cache.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::cache::PromptCache;
use crate::error::Result;
use crate::providers::TextGenerator;

/// How a result was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    /// Served from the cache without calling the model.
    Hit,
    /// Not cached; the model was called.
    Miss,
    /// The cache was not consulted.
    Bypass,
}

/// Generated text plus the wall-clock time spent producing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Inference {
    pub text: String,
    pub elapsed: Duration,
    pub outcome: CacheOutcome,
}

impl Inference {
    /// Elapsed time in seconds. Exactly `0.0` for cache hits.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Whether a response may be written to the cache.
///
/// Errors never reach this point. Blank responses are stored unless
/// `store_empty` is cleared.
#[derive(Debug, Clone, Copy)]
pub struct CachePolicy {
    pub store_empty: bool,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self { store_empty: true }
    }
}

impl CachePolicy {
    pub fn should_store(&self, response: &str) -> bool {
        self.store_empty || !response.trim().is_empty()
    }
}

/// Call the model unconditionally and time the call.
pub async fn uncached_inference<G>(model: &G, prompt: &str) -> Result<Inference>
where
    G: TextGenerator + ?Sized,
{
    let (text, elapsed) = timed_generate(model, prompt).await?;
    Ok(Inference {
        text,
        elapsed,
        outcome: CacheOutcome::Bypass,
    })
}

/// Serve `prompt` from `cache` when present, otherwise call the model and
/// store the answer under the verbatim prompt.
pub async fn cached_inference<G, C>(
    model: &G,
    prompt: &str,
    cache: &mut C,
    policy: CachePolicy,
) -> Result<Inference>
where
    G: TextGenerator + ?Sized,
    C: PromptCache + ?Sized,
{
    if let Some(text) = cache.get(prompt) {
        return Ok(Inference {
            text,
            elapsed: Duration::ZERO,
            outcome: CacheOutcome::Hit,
        });
    }

    let (text, elapsed) = timed_generate(model, prompt).await?;
    if policy.should_store(&text) {
        cache.put(prompt.to_string(), text.clone());
    } else {
        debug!("Empty response not cached");
    }

    Ok(Inference {
        text,
        elapsed,
        outcome: CacheOutcome::Miss,
    })
}

async fn timed_generate<G>(model: &G, prompt: &str) -> Result<(String, Duration)>
where
    G: TextGenerator + ?Sized,
{
    let start = Instant::now();
    let text = model.generate(prompt).await?;
    let elapsed = start.elapsed();
    debug!(
        provider = model.name(),
        model = model.model(),
        elapsed_ms = elapsed.as_millis() as u64,
        "Model call finished"
    );
    Ok((text, elapsed))
}
