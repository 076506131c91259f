//! End-to-end contract analysis: segmentation followed by risk flagging.

use std::path::Path;

use crate::config::SegmenterConfig;
use crate::error::Result;
use crate::risk::RiskMatcher;
use crate::splitting::Segmenter;
use crate::types::DocumentAnalysis;

/// Segments contract text and flags every clause.
///
/// Both collaborators are passed in explicitly; the analyzer holds no other
/// state and can be shared across threads.
#[derive(Debug, Clone)]
pub struct ContractAnalyzer {
    segmenter: Segmenter,
    matcher: RiskMatcher,
}

impl ContractAnalyzer {
    /// Create an analyzer from a segmenter and a matcher.
    #[must_use]
    pub fn new(segmenter: Segmenter, matcher: RiskMatcher) -> Self {
        Self { segmenter, matcher }
    }

    /// Create an analyzer with the default segmenter and the keyword table at
    /// `path`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the keyword table cannot be loaded.
    pub fn from_rules_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_config(SegmenterConfig::default(), path)
    }

    /// Create an analyzer with a custom segmenter configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the abbreviations are invalid or the
    /// keyword table cannot be loaded.
    pub fn with_config(config: SegmenterConfig, path: impl AsRef<Path>) -> Result<Self> {
        let segmenter = Segmenter::new(config)?;
        let matcher = RiskMatcher::from_path(path)?;
        Ok(Self::new(segmenter, matcher))
    }

    /// The segmenter in use.
    #[must_use]
    pub fn segmenter(&self) -> &Segmenter {
        &self.segmenter
    }

    /// The risk matcher in use.
    #[must_use]
    pub fn matcher(&self) -> &RiskMatcher {
        &self.matcher
    }

    /// Split `text` into clauses without flagging them.
    #[must_use]
    pub fn segment(&self, text: &str) -> Vec<String> {
        self.segmenter.segment(text)
    }

    /// Split `text` into clauses and flag each one.
    #[must_use]
    pub fn analyze(&self, text: &str) -> DocumentAnalysis {
        let clauses = self.segmenter.segment(text);
        let results = self.matcher.analyze(&clauses);
        let severities = self.matcher.table().tiers().iter().map(|t| t.severity().clone()).collect();
        DocumentAnalysis {
            severities,
            clauses,
            results,
        }
    }
}
