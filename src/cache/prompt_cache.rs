//! In-memory prompt cache keyed by the verbatim prompt text.
//!
//! No hashing, normalization, expiry or eviction: two prompts share an entry
//! only when they are byte-for-byte equal. The store lives for the lifetime
//! of the value and is never written to disk.

use std::collections::HashMap;

use tracing::debug;

/// Capability set required by the cached inference path.
pub trait PromptCache {
    /// Look up the response stored for `prompt`, recording a hit or a miss.
    fn get(&mut self, prompt: &str) -> Option<String>;

    /// Store `response` under `prompt`, replacing any previous value.
    fn put(&mut self, prompt: String, response: String);

    /// Return `true` if `prompt` has a stored response. Does not touch stats.
    fn contains(&self, prompt: &str) -> bool;

    /// Number of stored prompts.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every entry and reset the counters.
    fn clear(&mut self);

    fn stats(&self) -> CacheStats;
}

/// `HashMap`-backed [`PromptCache`].
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: HashMap<String, String>,
    hits: u64,
    misses: u64,
}

impl MemoryCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the stored response without recording a lookup.
    #[cfg(test)]
    pub(crate) fn peek(&self, prompt: &str) -> Option<&str> {
        self.entries.get(prompt).map(String::as_str)
    }
}

impl PromptCache for MemoryCache {
    fn get(&mut self, prompt: &str) -> Option<String> {
        match self.entries.get(prompt) {
            Some(response) => {
                self.hits = self.hits.saturating_add(1);
                debug!(prompt_len = prompt.len(), "Prompt cache hit");
                Some(response.clone())
            }
            None => {
                self.misses = self.misses.saturating_add(1);
                debug!(prompt_len = prompt.len(), "Prompt cache miss");
                None
            }
        }
    }

    fn put(&mut self, prompt: String, response: String) {
        self.entries.insert(prompt, response);
    }

    fn contains(&self, prompt: &str) -> bool {
        self.entries.contains_key(prompt)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            total_entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
        }
    }
}

/// Aggregate cache statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of entries currently in the cache.
    pub total_entries: usize,
    /// Lookups that found a stored response.
    pub hits: u64,
    /// Lookups that found nothing.
    pub misses: u64,
}

impl CacheStats {
    /// Fraction of lookups that hit, or `0.0` when nothing was looked up.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
