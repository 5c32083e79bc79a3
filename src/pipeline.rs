//! Fetch → prompt → one uncached and two cached inferences.

use tracing::info;

use crate::cache::{CacheStats, MemoryCache, PromptCache};
use crate::config::Config;
use crate::error::Result;
use crate::fetch::{Fetcher, PageSource};
use crate::inference::{cached_inference, uncached_inference, CachePolicy, Inference};
use crate::prompt::build_summary_prompt;
use crate::providers::TextGenerator;

/// Everything the summary run produced.
#[derive(Debug)]
pub struct SummaryReport {
    pub prompt: String,
    pub uncached: Inference,
    pub first_cached: Inference,
    pub second_cached: Inference,
    pub stats: CacheStats,
}

/// Run the summary flow against any page source and model.
///
/// `on_step` receives each section label twice: with `None` before the
/// inference starts and with its result once it finishes.
pub async fn run_summary<S, G, F>(
    fetcher: &Fetcher<S>,
    model: &G,
    config: &Config,
    mut on_step: F,
) -> Result<SummaryReport>
where
    S: PageSource,
    G: TextGenerator + ?Sized,
    F: FnMut(&str, Option<&Inference>),
{
    info!(
        url = %config.fetch.url,
        max_attempts = fetcher.retries(),
        "Fetching document"
    );
    let content = fetcher
        .fetch_article_content(&config.fetch.url, config.fetch.content_limit)
        .await?;

    let prompt = build_summary_prompt(&content, config.prompt.excerpt_chars);
    let policy = CachePolicy {
        store_empty: config.cache.store_empty,
    };

    on_step("NON CACHED", None);
    let uncached = uncached_inference(model, &prompt).await?;
    on_step("NON CACHED", Some(&uncached));

    let mut cache = MemoryCache::new();

    on_step("CACHED (first call)", None);
    let first_cached = cached_inference(model, &prompt, &mut cache, policy).await?;
    on_step("CACHED (first call)", Some(&first_cached));

    on_step("CACHED (second call)", None);
    let second_cached = cached_inference(model, &prompt, &mut cache, policy).await?;
    on_step("CACHED (second call)", Some(&second_cached));

    let stats = cache.stats();
    info!(
        entries = stats.total_entries,
        hits = stats.hits,
        misses = stats.misses,
        "Cache stats"
    );

    Ok(SummaryReport {
        prompt,
        uncached,
        first_cached,
        second_cached,
        stats,
    })
}
