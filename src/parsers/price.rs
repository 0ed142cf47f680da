use anyhow::{Context, Result};

/// Parse a whole-number price fragment ("1,299") into a float.
///
/// Thousands separators are stripped before parsing. No currency symbol
/// handling; the caller is expected to pass the bare integer-portion text.
pub fn parse_whole_price(text: &str) -> Result<f64> {
    let cleaned = text.trim().replace(',', "");
    cleaned
        .parse::<f64>()
        .with_context(|| format!("Unparseable price fragment: {:?}", text))
}
