//! Category enumeration for presentation filters.

use std::collections::BTreeSet;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::models::Event;

/// Synthetic entry that selects every category.
pub const ALL_CATEGORIES: &str = "all";

/// Normalize a category for comparison: trimmed, case-folded, accents removed.
///
/// Upper- then lower-casing expands letters such as `ß` to `ss`; NFKD then
/// splits accented letters (precomposed or not) so their marks can be dropped.
pub fn normalize_category(raw: &str) -> String {
    raw.trim()
        .to_uppercase()
        .to_lowercase()
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Distinct normalized categories in alphabetical order, prefixed with `"all"`.
///
/// Empty categories are dropped and `"all"` is never listed twice.
pub fn enumerate_categories(events: &[Event]) -> Vec<String> {
    let unique: BTreeSet<String> = events
        .iter()
        .map(|e| normalize_category(&e.category))
        .filter(|c| !c.is_empty() && c != ALL_CATEGORIES)
        .collect();

    std::iter::once(ALL_CATEGORIES.to_string())
        .chain(unique)
        .collect()
}
