//! Character-safe truncation and whitespace flattening.

/// Return the first `max_chars` characters of `s`.
///
/// Counts Unicode scalar values, so the cut never lands inside a code point.
pub fn take_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Line boundaries: `\n`, `\r`, vertical tab, form feed, the ASCII file,
/// group and record separators, NEL, and the Unicode line/paragraph separators.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c'..='\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Whitespace as stripped from line and phrase ends: Unicode whitespace plus
/// the ASCII file, group, record and unit separators.
fn is_strippable(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

fn strip(s: &str) -> &str {
    s.trim_matches(is_strippable)
}

/// Flatten extracted page text into one phrase per line.
///
/// Every line is trimmed, then split on runs of two spaces; each phrase is
/// trimmed and empty phrases are dropped. The survivors are joined with `\n`.
pub fn collapse_whitespace(text: &str) -> String {
    text.split(is_line_break)
        .map(strip)
        .flat_map(|line| line.split("  "))
        .map(strip)
        .filter(|phrase| !phrase.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
