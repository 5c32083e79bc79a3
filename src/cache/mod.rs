//! Exact-match prompt caching.

pub mod prompt_cache;

pub use prompt_cache::{CacheStats, MemoryCache, PromptCache};
