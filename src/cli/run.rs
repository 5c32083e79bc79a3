//! The fetch → summarize → cache demonstration.

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use promptcache::config::Config;
use promptcache::fetch::{Fetcher, HttpSource};
use promptcache::inference::{CacheOutcome, Inference};
use promptcache::pipeline::run_summary;
use promptcache::prompt::preview;
use promptcache::providers::{OllamaProvider, TextGenerator};

/// Fetch the page, then run one uncached and two cached inferences on the same prompt.
pub(crate) async fn cmd_run(config: Config) -> Result<()> {
    let source = HttpSource::from_config(&config.fetch)?;
    let fetcher = Fetcher::new(
        source,
        config.fetch.retries,
        Duration::from_millis(config.fetch.retry_delay_ms),
    );
    let model = OllamaProvider::from_config(&config.model)?;
    info!(provider = model.name(), model = model.model(), "Using model");

    println!("Fetching document...");
    let report = run_summary(&fetcher, &model, &config, print_step)
        .await
        .context("Summary run failed")?;

    println!(
        "\nCache: {} entr{}, {} hit(s), {} miss(es), hit rate {:.0}%",
        report.stats.total_entries,
        if report.stats.total_entries == 1 { "y" } else { "ies" },
        report.stats.hits,
        report.stats.misses,
        report.stats.hit_rate() * 100.0
    );

    println!(
        "\n=== RESULT (first {} chars) ===",
        config.prompt.preview_chars
    );
    println!(
        "{}",
        preview(&report.second_cached.text, config.prompt.preview_chars)
    );

    Ok(())
}

fn print_step(label: &str, result: Option<&Inference>) {
    match result {
        None => println!("\n--- {} ---", label),
        Some(inference) => {
            match inference.outcome {
                CacheOutcome::Hit => println!("Cache hit"),
                CacheOutcome::Miss => println!("Cache miss"),
                CacheOutcome::Bypass => {}
            }
            println!("Time: {:.2}s", inference.elapsed_secs());
        }
    }
}
