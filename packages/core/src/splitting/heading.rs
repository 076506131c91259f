//! Heading detection.
//!
//! Splits normalized, masked text into parts at heading-like line starts.
//! Two shapes are recognised, both case-insensitive and anchored at the start
//! of the text or right after a newline:
//!
//! - `Section 4:`, `ARTICLE IV -`, `article 2.` (keyword, identifier, punctuation)
//! - `1.`, `1.1`, `2)`, `3 a.`, `4.2.1 -` (number, sub-numbers, letter, punctuation)
//!
//! When both shapes could start at the same position the keyword shape wins,
//! because it is the first alternative of a leftmost-first regex. The two
//! cannot actually compete for one line: the keyword shape needs a line that
//! starts with a letter, the numeric shape one that starts with a digit.

use regex::Regex;
use std::sync::LazyLock;

/// Heading pattern: keyword headings first, numbered headings second.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static HEADING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)(?:",
        r"(?:(?:^|\n)\s*(?:section|article)\s+\w+[:.\s-]*)",
        r"|(?:(?:^|\n)\s*\d+(?:\.\d+)*\s*[a-z]?\s*[-.)]?\s+)",
        r")",
    ))
    .expect("valid regex")
});

/// A trimmed, non-empty slice of the masked text: a heading or the text
/// between two headings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Part<'a> {
    pub text: &'a str,
}

impl<'a> Part<'a> {
    /// Trim `text`, returning `None` if nothing is left.
    #[must_use]
    pub fn new(text: &'a str) -> Option<Self> {
        let text = text.trim();
        (!text.is_empty()).then_some(Self { text })
    }

    /// Number of whitespace-separated words.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Split text into heading and body parts in document order.
///
/// Parts never overlap and, ignoring the whitespace trimmed from their edges,
/// concatenate back to the input. Text without any heading comes back as a
/// single body part.
#[must_use]
pub fn split_at_headings(text: &str) -> Vec<Part<'_>> {
    let mut parts = Vec::new();
    let mut last_end = 0;

    for m in HEADING_PATTERN.find_iter(text) {
        if m.start() > last_end {
            parts.extend(Part::new(&text[last_end..m.start()]));
        }
        parts.extend(Part::new(m.as_str()));
        last_end = m.end();
    }

    if last_end < text.len() {
        parts.extend(Part::new(&text[last_end..]));
    }

    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(parts: &[Part<'a>]) -> Vec<&'a str> {
        parts.iter().map(|p| p.text).collect()
    }

    #[test]
    fn test_numbered_headings() {
        let parts = split_at_headings("1. Scope\n2. Payment terms apply\n2.1 Invoices are monthly");
        assert_eq!(
            texts(&parts),
            vec!["1.", "Scope", "2.", "Payment terms apply", "2.1", "Invoices are monthly"]
        );
    }

    #[test]
    fn test_section_and_article_headings() {
        let parts = split_at_headings("Section 4: Fees are due.\nARTICLE IV - Term of the lease");
        assert_eq!(
            texts(&parts),
            vec!["Section 4:", "Fees are due.", "ARTICLE IV -", "Term of the lease"]
        );
    }

    #[test]
    fn test_parenthesised_and_lettered_numbers() {
        let parts = split_at_headings("2) Delivery\n3 a. Acceptance testing");
        assert_eq!(texts(&parts), vec!["2)", "Delivery", "3 a.", "Acceptance testing"]);
    }

    #[test]
    fn test_heading_only_at_line_start() {
        let parts = split_at_headings("Payment within 30 days of receipt.");
        assert_eq!(texts(&parts), vec!["Payment within 30 days of receipt."]);

        let parts = split_at_headings("See section 5 for details.");
        assert_eq!(parts.len(), 1);
    }

    #[test]
    fn test_preamble_before_first_heading() {
        let parts = split_at_headings("This Agreement is made today.\n1. Definitions");
        assert_eq!(texts(&parts), vec!["This Agreement is made today.", "1.", "Definitions"]);
    }

    #[test]
    fn test_keyword_shape_takes_precedence() {
        // The keyword alternative consumes the number and its period, so "1."
        // is never reported as a heading of its own.
        let parts = split_at_headings("Section 1. Services");
        assert_eq!(texts(&parts), vec!["Section 1.", "Services"]);
    }

    #[test]
    fn test_no_headings_and_empty_input() {
        assert!(split_at_headings("").is_empty());
        let parts = split_at_headings("Plain text only");
        assert_eq!(texts(&parts), vec!["Plain text only"]);
    }

    #[test]
    fn test_parts_reconstruct_input() {
        let text = "Intro text\n1. First clause body\nSection 2 - Second clause body";
        let parts = split_at_headings(text);
        let joined: String = texts(&parts).join(" ");
        let collapse = |s: &str| s.split_whitespace().collect::<Vec<_>>().join(" ");
        assert_eq!(collapse(&joined), collapse(text));
    }

    #[test]
    fn test_word_count() {
        let part = Part::new("  three short words ").unwrap();
        assert_eq!(part.text, "three short words");
        assert_eq!(part.word_count(), 3);
        assert!(Part::new("   ").is_none());
    }
}
