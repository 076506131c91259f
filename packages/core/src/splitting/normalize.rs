//! Whitespace normalization ahead of segmentation.

use regex::Regex;
use std::sync::LazyLock;

use super::abbreviation::{PLACEHOLDER_CLOSE, PLACEHOLDER_OPEN};

/// Any run of whitespace other than a newline.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static HORIZONTAL_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\S\n]+").expect("valid regex"));

/// Normalize line endings and horizontal whitespace.
///
/// - `\r\n` and lone `\r` become `\n`
/// - placeholder sentinels are dropped so masked text cannot be forged
/// - runs of spaces, tabs and other non-newline whitespace become one space
/// - leading and trailing whitespace is trimmed
///
/// Newlines are kept: headings are only recognised at line starts.
///
/// # Examples
/// ```
/// use clausewise_core::splitting::normalize;
///
/// assert_eq!(normalize("  1.\tScope \r\n of  work "), "1. Scope \n of work");
/// ```
#[must_use]
pub fn normalize(text: &str) -> String {
    let unified: String = text
        .replace("\r\n", "\n")
        .chars()
        .filter(|c| *c != PLACEHOLDER_OPEN && *c != PLACEHOLDER_CLOSE)
        .map(|c| if c == '\r' { '\n' } else { c })
        .collect();
    HORIZONTAL_WHITESPACE
        .replace_all(&unified, " ")
        .trim()
        .to_string()
}
