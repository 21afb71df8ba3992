// =============================================================================
// String Utilities
// =============================================================================

/// Capitalize the first character of a string.
/// Used for sentence-style insight text and report headings.
#[inline]
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// Turn a snake_case identifier into readable words (`well_defined` -> `well defined`)
pub fn humanize(identifier: &str) -> String {
    identifier.replace('_', " ")
}

/// Turn a snake_case identifier into a title (`cost_savings_roi` -> `Cost Savings Roi`)
pub fn title_case(identifier: &str) -> String {
    identifier
        .split('_')
        .filter(|word| !word.is_empty())
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Truncate to at most `max_chars` characters, respecting char boundaries.
///
/// Returns the original slice when it already fits.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &s[..byte_idx],
        None => s,
    }
}
