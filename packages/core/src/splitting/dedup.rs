//! Final restoration and deduplication of clause candidates.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use super::abbreviation::MaskedText;

/// A line break together with the spaces around it.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" ?\n[\n ]*").expect("valid regex"));

/// Restore abbreviations in each candidate and keep the first copy of each
/// restored string, in candidate order.
///
/// Line breaks left inside a candidate (a heading merged with a multi-line
/// body) are folded into single spaces before comparing.
#[must_use]
pub fn restore_unique<'a>(candidates: impl IntoIterator<Item = &'a str>, masked: &MaskedText) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut clauses = Vec::new();

    for candidate in candidates {
        let restored = LINE_BREAK.replace_all(&masked.restore(candidate), " ").into_owned();
        if seen.insert(restored.clone()) {
            clauses.push(restored);
        } else {
            tracing::trace!(clause = %restored, "Dropping duplicate clause");
        }
    }

    clauses
}
