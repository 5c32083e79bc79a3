//! Summary prompt template.

use crate::utils::take_chars;

/// Wrap the first `excerpt_chars` characters of `content` in `<doc>` tags
/// and ask for a five-bullet summary.
///
/// The output is the cache key, so it must be deterministic for a given
/// `(content, excerpt_chars)`.
pub fn build_summary_prompt(content: &str, excerpt_chars: usize) -> String {
    format!(
        "\n<doc>\n{}\n</doc>\n\nSummarize this document in 5 bullets.\n",
        take_chars(content, excerpt_chars)
    )
}

/// First `max_chars` characters of a model answer, for display.
pub fn preview(text: &str, max_chars: usize) -> &str {
    take_chars(text, max_chars)
}
