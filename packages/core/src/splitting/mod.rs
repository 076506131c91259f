//! Clause segmentation for contract text.
//!
//! The pipeline runs in fixed stages:
//!
//! 1. [`normalize`] line endings and horizontal whitespace
//! 2. mask abbreviations ([`AbbreviationGuard`])
//! 3. cut at headings ([`split_at_headings`])
//! 4. join isolated headings with their body ([`merge_headings`])
//! 5. split long spans into sentences ([`split_sentences`])
//! 6. restore abbreviations and drop duplicates ([`restore_unique`])

mod abbreviation;
mod dedup;
mod heading;
mod merge;
mod normalize;
mod sentence;

pub use abbreviation::{AbbreviationGuard, MaskedText, PLACEHOLDER_CLOSE, PLACEHOLDER_OPEN};
pub use dedup::restore_unique;
pub use heading::{split_at_headings, Part};
pub use merge::merge_headings;
pub use normalize::normalize;
pub use sentence::split_sentences;

use crate::config::SegmenterConfig;
use crate::error::Result;

/// Heuristic clause segmenter.
///
/// Holds only immutable state, so one instance can serve many documents and
/// threads at once.
#[derive(Debug, Clone)]
pub struct Segmenter {
    config: SegmenterConfig,
    guard: AbbreviationGuard,
}

impl Segmenter {
    /// Create a segmenter.
    ///
    /// # Errors
    /// Returns `AnalysisError::InvalidAbbreviation` if the abbreviation list
    /// cannot be compiled.
    pub fn new(config: SegmenterConfig) -> Result<Self> {
        let guard = AbbreviationGuard::new(&config)?;
        Ok(Self { config, guard })
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// Split contract text into clauses.
    ///
    /// Clauses are non-empty, trimmed, unique and in document order. Empty or
    /// whitespace-only input yields no clauses.
    #[must_use]
    pub fn segment(&self, text: &str) -> Vec<String> {
        let normalized = normalize(text);
        if normalized.is_empty() {
            return Vec::new();
        }

        let masked = self.guard.mask(&normalized);
        let parts = split_at_headings(masked.as_str());
        let spans = merge_headings(&parts, self.config.max_heading_words, self.config.min_body_words);

        let mut candidates: Vec<&str> = Vec::new();
        for span in &spans {
            let span = span.trim();
            if span.is_empty() {
                continue;
            }
            if masked.restore(span).chars().count() < self.config.sentence_split_threshold {
                candidates.push(span);
            } else {
                candidates.extend(split_sentences(span));
            }
        }

        let clauses = restore_unique(candidates.iter().copied(), &masked);
        tracing::debug!(
            abbreviations = masked.masked_count(),
            parts = parts.len(),
            spans = spans.len(),
            candidates = candidates.len(),
            clauses = clauses.len(),
            "Segmented document"
        );
        clauses
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        let config = SegmenterConfig::default();
        #[allow(clippy::expect_used)] // Built-in abbreviations are statically valid
        let guard = AbbreviationGuard::new(&config).expect("default abbreviations are valid");
        Self { config, guard }
    }
}

/// Split contract text into clauses with the default configuration.
///
/// # Examples
/// ```
/// use clausewise_core::splitting::split_into_clauses;
///
/// let clauses = split_into_clauses("1. Termination\nEither party may end this agreement.");
/// assert_eq!(clauses, vec!["1. Termination Either party may end this agreement."]);
/// assert!(split_into_clauses("").is_empty());
/// ```
#[must_use]
pub fn split_into_clauses(text: &str) -> Vec<String> {
    Segmenter::default().segment(text)
}
