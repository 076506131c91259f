//! Error types for clause analysis.
//!
//! Segmentation never fails on input text: empty or oddly formatted documents
//! degrade to an empty or best-effort clause list. Every variant here is
//! therefore a configuration error, surfaced at construction time.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the core library.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The keyword table resource could not be read.
    #[error("Risk keyword table not readable at {}: {source}", .path.display())]
    RulesNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The keyword table is not valid YAML (or JSON) of the expected shape.
    #[error("Risk keyword table{} is malformed: {source}", .path.as_ref().map(|p| format!(" at {}", p.display())).unwrap_or_default())]
    RulesParse {
        path: Option<PathBuf>,
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// The keyword table parsed, but its content is unusable.
    #[error("Invalid risk keyword table: {0}")]
    InvalidRules(String),

    /// A configured abbreviation cannot be protected.
    #[error("Invalid abbreviation '{0}': must be non-empty and end with a period")]
    InvalidAbbreviation(String),
}

impl AnalysisError {
    /// Whether this error stems from deployment configuration rather than
    /// document content. Always true today; kept as a method so callers do not
    /// match on variants.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::RulesNotFound { .. }
                | Self::RulesParse { .. }
                | Self::InvalidRules(_)
                | Self::InvalidAbbreviation(_)
        )
    }
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;
