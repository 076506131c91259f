//! Clausewise core
//!
//! Splits unstructured contract text into clauses and flags each clause with
//! risk keywords from a severity-tiered table:
//! - Heuristic clause segmentation that survives abbreviations like `Pvt. Ltd.`
//! - Heading detection for numbered and `Section`/`Article` headings
//! - Case-insensitive keyword matching against a YAML keyword table
//!
//! # Example
//!
//! ```
//! use clausewise_core::{ContractAnalyzer, RiskKeywordTable, RiskMatcher, Segmenter};
//!
//! let table = RiskKeywordTable::from_yaml_str("high: [terminate]\nlow: [notice]")?;
//! let analyzer = ContractAnalyzer::new(Segmenter::default(), RiskMatcher::new(table));
//!
//! let analysis = analyzer.analyze(
//!     "1. Termination. Either party may terminate this agreement with 30 days notice.",
//! );
//! assert_eq!(analysis.clauses.len(), 1);
//! assert!(analysis.results[0].is_risky);
//! # Ok::<(), clausewise_core::AnalysisError>(())
//! ```

pub mod analyzer;
pub mod config;
pub mod error;
pub mod risk;
pub mod splitting;
pub mod types;

// Re-export commonly used items
pub use analyzer::ContractAnalyzer;
pub use config::{resolve_rules_path, SegmenterConfig};
pub use error::{AnalysisError, Result};
pub use risk::{RiskKeywordTable, RiskMatcher, SeverityTier};
pub use splitting::{split_into_clauses, Segmenter};
pub use types::{ClauseAnalysis, DocumentAnalysis, RiskMatch, Severity};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
