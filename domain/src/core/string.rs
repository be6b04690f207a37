//! String utilities for the domain layer.

/// Take at most `max_chars` characters from the start of `s` (no ellipsis).
///
/// Counts Unicode scalar values, so multi-byte text is never split.
pub fn first_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Truncate a string to a maximum number of characters, appending `...`
/// when anything was cut off.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        format!("{}...", first_chars(s, max_chars.saturating_sub(3)))
    }
}

/// Collapse every run of whitespace into a single space and trim the ends.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
