//! Merging of isolated headings with the body that follows them.

use super::heading::Part;

/// Join each short part with a substantial successor.
///
/// A part with at most `max_heading_words` words is merged with the next part
/// when that part has more than `min_body_words` words. The pass runs once,
/// left to right: a part consumed as the second half of a merge is never
/// looked at again, and a merged span is never merged a second time.
#[must_use]
pub fn merge_headings(parts: &[Part<'_>], max_heading_words: usize, min_body_words: usize) -> Vec<String> {
    let mut merged = Vec::with_capacity(parts.len());
    let mut i = 0;

    while i < parts.len() {
        let part = parts[i];
        if let Some(next) = parts.get(i + 1) {
            if part.word_count() <= max_heading_words && next.word_count() > min_body_words {
                merged.push(format!("{} {}", part.text, next.text));
                i += 2;
                continue;
            }
        }
        merged.push(part.text.to_string());
        i += 1;
    }

    merged
}
