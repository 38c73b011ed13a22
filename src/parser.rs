//! Splitting of delimited identifier lists.
//!
//! Work item parameters carry several IDs in one string, e.g.
//! `"espiegelberg,   drbug   "`. Tokens are trimmed, empty tokens are
//! dropped and order is kept.

/// Separator used when nothing else is configured.
pub const DEFAULT_SEPARATOR: char = ',';

/// Iterate over the trimmed, non-empty IDs in `raw`.
///
/// `None`, empty and whitespace-only input yield nothing.
pub fn split_ids(raw: Option<&str>, separator: char) -> impl Iterator<Item = &str> {
    raw.into_iter()
        .flat_map(move |s| s.split(separator))
        .map(str::trim)
        .filter(|id| !id.is_empty())
}

/// Collecting variant of [`split_ids`].
pub fn parse_ids(raw: Option<&str>, separator: char) -> Vec<String> {
    split_ids(raw, separator).map(str::to_string).collect()
}
