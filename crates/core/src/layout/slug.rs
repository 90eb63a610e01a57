//! ASCII slugs for file names.

use unicode_normalization::UnicodeNormalization;

/// Turns arbitrary text into a lowercase ASCII token.
///
/// German umlauts and sharp s are expanded (`ü` to `ue`, `ß` to `ss`), other
/// characters are decomposed (NFKD) and stripped to ASCII. Everything outside
/// `[a-z0-9]` is dropped; runs of whitespace and underscores become one `_`.
///
/// `slug` is idempotent. Distinct inputs can map to the same slug
/// (`Müller` and `Mueller`), callers that key files by slug must expect that.
#[must_use]
pub fn slug(text: &str) -> String {
    let mut expanded = String::with_capacity(text.len());
    for c in text.nfc() {
        match c {
            'ä' => expanded.push_str("ae"),
            'ö' => expanded.push_str("oe"),
            'ü' => expanded.push_str("ue"),
            'Ä' => expanded.push_str("Ae"),
            'Ö' => expanded.push_str("Oe"),
            'Ü' => expanded.push_str("Ue"),
            'ß' => expanded.push_str("ss"),
            'ẞ' => expanded.push_str("SS"),
            other => expanded.push(other),
        }
    }

    let kept: String = expanded
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| c.to_ascii_lowercase())
        .map(|c| if c == '_' { ' ' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect();

    kept.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Builds the per-student base name `<slug(last)>_<slug(first)>`.
#[must_use]
pub fn base_name(last_name: &str, first_name: &str) -> String {
    format!("{}_{}", slug(last_name), slug(first_name))
}
