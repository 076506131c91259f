//! Sentence splitting of long spans.

use regex::Regex;
use std::sync::LazyLock;

/// Terminal punctuation followed by whitespace.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SENTENCE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.?!]\s+").expect("valid regex"));

/// Split a span after every `.`, `?` or `!` that is followed by whitespace.
///
/// The punctuation stays with the fragment before it; the whitespace is
/// dropped. Fragments are trimmed and empty ones skipped.
///
/// # Examples
/// ```
/// use clausewise_core::splitting::split_sentences;
///
/// assert_eq!(
///     split_sentences("Pay on time. Late fees apply! Questions?"),
///     vec!["Pay on time.", "Late fees apply!", "Questions?"]
/// );
/// ```
#[must_use]
pub fn split_sentences(span: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in SENTENCE_BOUNDARY.find_iter(span) {
        // The punctuation is a single ASCII byte.
        let end = m.start() + 1;
        push_trimmed(&mut sentences, &span[start..end]);
        start = m.end();
    }
    push_trimmed(&mut sentences, &span[start..]);

    sentences
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, fragment: &'a str) {
    let fragment = fragment.trim();
    if !fragment.is_empty() {
        sentences.push(fragment);
    }
}
