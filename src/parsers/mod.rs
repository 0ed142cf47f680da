pub mod price;

pub use price::*;

use html_escape::decode_html_entities;

/// Clean and normalize text by removing extra whitespace and decoding HTML entities
pub fn clean_text(text: &str) -> String {
    let decoded = decode_html_entities(text);
    decoded
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Drop the last `n` characters of `text`.
///
/// Pure fixed-offset slicing on character boundaries; not currency-aware.
/// Returns an empty string when the text is shorter than `n`.
pub fn trim_trailing_chars(text: &str, n: usize) -> String {
    let len = text.chars().count();
    text.chars().take(len.saturating_sub(n)).collect()
}

/// Drop the first `n` characters of `text`.
pub fn strip_leading_chars(text: &str, n: usize) -> String {
    text.chars().skip(n).collect()
}
