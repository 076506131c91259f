//! Reversible masking of period-bearing abbreviations.
//!
//! Every occurrence of a protected abbreviation is replaced by a placeholder
//! `U+E000 <n> U+E001`, where `n` indexes the exact text that was replaced.
//! Placeholders contain no period and no whitespace, so neither the heading
//! detector nor the sentence splitter can cut through them. Matching is
//! case-insensitive on the original text; restoring puts back the original
//! spelling, so `DR.` stays `DR.`.

use regex::{Captures, Regex};
use std::cmp::Reverse;
use std::sync::LazyLock;

use crate::config::SegmenterConfig;
use crate::error::{AnalysisError, Result};

/// Opens a placeholder token.
pub const PLACEHOLDER_OPEN: char = '\u{E000}';

/// Closes a placeholder token.
pub const PLACEHOLDER_CLOSE: char = '\u{E001}';

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PLACEHOLDER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("\u{E000}([0-9]+)\u{E001}").expect("valid regex"));

/// Compiled matcher for a set of abbreviations.
#[derive(Debug, Clone)]
pub struct AbbreviationGuard {
    pattern: Option<Regex>,
}

impl AbbreviationGuard {
    /// Build a guard for the abbreviations in `config`.
    ///
    /// # Errors
    /// Returns `AnalysisError::InvalidAbbreviation` when an entry is blank or
    /// lacks a trailing period.
    pub fn new(config: &SegmenterConfig) -> Result<Self> {
        config.validate()?;

        let mut abbreviations: Vec<&str> = config.abbreviations.iter().map(|a| a.trim()).collect();
        // Longest first, so "Mrs." is tried before "Mr." and "Pvt. Ltd." before anything shorter.
        abbreviations.sort_by_cached_key(|a| (Reverse(a.len()), a.to_lowercase()));
        abbreviations.dedup_by(|a, b| a.eq_ignore_ascii_case(b));

        if abbreviations.is_empty() {
            return Ok(Self { pattern: None });
        }

        let alternatives: Vec<String> = abbreviations.iter().copied().map(abbreviation_pattern).collect();
        let source = format!("(?i)(?:{})", alternatives.join("|"));
        let pattern = Regex::new(&source).map_err(|e| {
            AnalysisError::InvalidAbbreviation(format!("{}: {e}", abbreviations.join(", ")))
        })?;

        Ok(Self {
            pattern: Some(pattern),
        })
    }

    /// Replace every protected abbreviation in `text` with a placeholder.
    #[must_use]
    pub fn mask(&self, text: &str) -> MaskedText {
        let Some(pattern) = &self.pattern else {
            return MaskedText {
                text: text.to_string(),
                originals: Vec::new(),
            };
        };

        let mut originals: Vec<String> = Vec::new();
        let masked = pattern.replace_all(text, |caps: &Captures<'_>| {
            let index = originals.len();
            originals.push(caps[0].to_string());
            format!("{PLACEHOLDER_OPEN}{index}{PLACEHOLDER_CLOSE}")
        });

        MaskedText {
            text: masked.into_owned(),
            originals,
        }
    }
}

/// Regex source for one abbreviation.
///
/// Internal spaces match any whitespace run so "Pvt.\nLtd." is still caught.
/// A leading word character must not follow another word character, which
/// keeps "Dr." from matching inside "Addr.".
fn abbreviation_pattern(abbreviation: &str) -> String {
    let body = abbreviation
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    if abbreviation.chars().next().is_some_and(char::is_alphanumeric) {
        format!(r"\b{body}")
    } else {
        body
    }
}

/// Text with abbreviations replaced by placeholders, plus what they replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedText {
    text: String,
    originals: Vec<String>,
}

impl MaskedText {
    /// The masked text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of abbreviation occurrences that were masked.
    #[must_use]
    pub fn masked_count(&self) -> usize {
        self.originals.len()
    }

    /// Put the original abbreviations back into a span of the masked text.
    ///
    /// Placeholders that do not belong to this text are left untouched.
    #[must_use]
    pub fn restore(&self, span: &str) -> String {
        if self.originals.is_empty() || !span.contains(PLACEHOLDER_OPEN) {
            return span.to_string();
        }

        PLACEHOLDER_PATTERN
            .replace_all(span, |caps: &Captures<'_>| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| self.originals.get(index))
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}
