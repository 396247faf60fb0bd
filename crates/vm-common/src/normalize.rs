//! Text normalization shared by every scoring rule.
//!
//! Raw profile strings are never compared directly. Everything goes through
//! [`normalize`] (lowercase + trim) first, and list-valued fields are split on
//! commas so `"Health, Tech"` and `["health", "tech"]` compare the same way.

/// Minimum exclusive character count for a word to take part in keyword overlap.
pub const KEYWORD_MIN_EXCLUSIVE_LEN: usize = 4;

/// Lowercase and trim a free-text field. Absent input yields an empty string.
pub fn normalize(text: Option<&str>) -> String {
    match text {
        Some(value) => value.trim().to_lowercase(),
        None => String::new(),
    }
}

/// Split a comma-delimited field into normalized tokens.
///
/// Empty elements (`"a,,b"`, trailing commas, blank input) are dropped so an
/// absent field degrades to an empty list.
pub fn split_list(text: Option<&str>) -> Vec<String> {
    text.map(|value| {
        value
            .split(',')
            .map(|part| normalize(Some(part)))
            .filter(|part| !part.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

/// Normalize every element of a list field; elements may themselves be comma-delimited.
pub fn normalize_list(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|value| split_list(Some(value)))
        .collect()
}

/// Words of the normalized text that are long enough to count as keywords.
pub fn keyword_tokens(text: &str) -> Vec<String> {
    normalize(Some(text))
        .split_whitespace()
        .filter(|word| word.chars().count() > KEYWORD_MIN_EXCLUSIVE_LEN)
        .map(str::to_string)
        .collect()
}

/// Bidirectional substring containment. Empty tokens never overlap.
pub fn overlaps(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(b) || b.contains(a)
}

/// True when any token of `left` overlaps any token of `right`.
pub fn any_overlap(left: &[String], right: &[String]) -> bool {
    left.iter().any(|l| right.iter().any(|r| overlaps(l, r)))
}

/// `Some(trimmed)` when the field carries non-whitespace text.
pub fn non_blank(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|value| !value.is_empty())
}
