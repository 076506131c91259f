//! Configuration constants and segmenter settings.

use std::path::{Path, PathBuf};

use crate::error::{AnalysisError, Result};

/// Default location of the risk keyword table, relative to the working directory.
pub const DEFAULT_RULES_PATH: &str = "rules/risk_keywords.yaml";

/// Environment variable that overrides [`DEFAULT_RULES_PATH`].
pub const RULES_PATH_ENV: &str = "CLAUSEWISE_RULES";

/// Maximum size of a keyword table resource in bytes.
pub const MAX_RULES_SIZE: usize = 1024 * 1024;

/// A part with at most this many words may be merged into the next part.
pub const MAX_HEADING_WORDS: usize = 8;

/// The next part must have more than this many words to absorb a heading.
pub const MIN_BODY_WORDS: usize = 2;

/// Merged spans shorter than this (in characters) are never sentence-split.
pub const SENTENCE_SPLIT_THRESHOLD: usize = 200;

/// Abbreviations protected from being read as sentence or heading boundaries.
///
/// Matching is case-insensitive; the original spelling is restored verbatim.
pub const DEFAULT_ABBREVIATIONS: &[&str] = &["Pvt. Ltd.", "e.g.", "i.e.", "etc.", "Mr.", "Mrs.", "Dr."];

/// Settings for the clause segmenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmenterConfig {
    /// Upper bound on the word count of a part treated as an isolated heading.
    pub max_heading_words: usize,

    /// The following part needs strictly more words than this to be merged.
    pub min_body_words: usize,

    /// Character length from which a merged span is split into sentences.
    pub sentence_split_threshold: usize,

    /// Abbreviations to protect. Each must end with a period.
    pub abbreviations: Vec<String>,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            max_heading_words: MAX_HEADING_WORDS,
            min_body_words: MIN_BODY_WORDS,
            sentence_split_threshold: SENTENCE_SPLIT_THRESHOLD,
            abbreviations: DEFAULT_ABBREVIATIONS.iter().map(|a| (*a).to_string()).collect(),
        }
    }
}

impl SegmenterConfig {
    /// Set the heading word limit.
    #[must_use]
    pub fn with_max_heading_words(mut self, words: usize) -> Self {
        self.max_heading_words = words;
        self
    }

    /// Set the minimum body word count.
    #[must_use]
    pub fn with_min_body_words(mut self, words: usize) -> Self {
        self.min_body_words = words;
        self
    }

    /// Set the sentence split threshold.
    #[must_use]
    pub fn with_sentence_split_threshold(mut self, chars: usize) -> Self {
        self.sentence_split_threshold = chars;
        self
    }

    /// Append extra abbreviations to the protected set.
    #[must_use]
    pub fn with_abbreviations(mut self, abbreviations: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.abbreviations.extend(abbreviations.into_iter().map(Into::into));
        self
    }

    /// Check that every abbreviation can be protected.
    ///
    /// # Errors
    /// Returns `AnalysisError::InvalidAbbreviation` for blank entries or entries
    /// without a trailing period.
    pub fn validate(&self) -> Result<()> {
        for abbreviation in &self.abbreviations {
            let trimmed = abbreviation.trim();
            if trimmed.is_empty() || !trimmed.ends_with('.') {
                return Err(AnalysisError::InvalidAbbreviation(abbreviation.clone()));
            }
        }
        Ok(())
    }
}

/// Resolve the keyword table location.
///
/// Precedence: an explicit path, then the `CLAUSEWISE_RULES` environment
/// variable, then [`DEFAULT_RULES_PATH`].
pub fn resolve_rules_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    match std::env::var(RULES_PATH_ENV) {
        Ok(value) if !value.trim().is_empty() => PathBuf::from(value),
        _ => PathBuf::from(DEFAULT_RULES_PATH),
    }
}
