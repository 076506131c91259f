//! Keyword-based risk flagging of clauses.

use std::path::Path;

use super::table::RiskKeywordTable;
use crate::error::Result;
use crate::types::{ClauseAnalysis, RiskMatch};

/// Flags clauses that contain keywords from a [`RiskKeywordTable`].
///
/// Matching is a case-insensitive substring test with no stemming and no word
/// boundaries: `fee` matches "Fees", and `terminat` is needed to catch both
/// "terminate" and "termination".
#[derive(Debug, Clone)]
pub struct RiskMatcher {
    table: RiskKeywordTable,
}

impl RiskMatcher {
    /// Create a matcher over an already loaded table.
    #[must_use]
    pub fn new(table: RiskKeywordTable) -> Self {
        Self { table }
    }

    /// Load the table from `path` and create a matcher.
    ///
    /// # Errors
    ///
    /// Propagates the load errors of [`RiskKeywordTable::from_path`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        RiskKeywordTable::from_path(path).map(Self::new)
    }

    /// The keyword table in use.
    #[must_use]
    pub fn table(&self) -> &RiskKeywordTable {
        &self.table
    }

    /// All `(severity, keyword)` pairs found in `clause`, in table order.
    #[must_use]
    pub fn match_clause(&self, clause: &str) -> Vec<RiskMatch> {
        let lowered = clause.to_lowercase();
        let lowered = lowered.as_str();
        self.table
            .tiers()
            .iter()
            .flat_map(move |tier| {
                tier.entries()
                    .iter()
                    .filter(move |keyword| lowered.contains(keyword.lowered.as_str()))
                    .map(move |keyword| RiskMatch::new(tier.severity().clone(), keyword.text.as_str()))
            })
            .collect()
    }

    /// Analyse every clause, keeping input order and indices.
    #[must_use]
    pub fn analyze<S: AsRef<str>>(&self, clauses: &[S]) -> Vec<ClauseAnalysis> {
        let results: Vec<ClauseAnalysis> = clauses
            .iter()
            .enumerate()
            .map(|(index, clause)| {
                let clause = clause.as_ref();
                ClauseAnalysis::new(index, clause, self.match_clause(clause))
            })
            .collect();

        tracing::debug!(
            clauses = results.len(),
            risky = results.iter().filter(|r| r.is_risky).count(),
            "Flagged clauses"
        );
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn matcher(yaml: &str) -> RiskMatcher {
        RiskMatcher::new(RiskKeywordTable::from_yaml_str(yaml).unwrap())
    }

    #[test]
    fn test_case_insensitive_substring() {
        let m = matcher("high: [terminate]");
        assert_eq!(
            m.match_clause("Either party may TERMINATE this agreement."),
            vec![RiskMatch::new("high", "terminate")]
        );
        assert!(m.match_clause("The term is two years.").is_empty());
    }

    #[test]
    fn test_matches_inside_words() {
        let m = matcher("low: [fee]");
        assert_eq!(m.match_clause("Fees are payable."), vec![RiskMatch::new("low", "fee")]);
    }

    #[test]
    fn test_keyword_reported_as_configured() {
        let m = matcher("medium: [Indemnify]");
        let matches = m.match_clause("the supplier shall indemnify the customer");
        assert_eq!(matches[0].keyword, "Indemnify");
    }

    #[test]
    fn test_matches_follow_table_order() {
        let m = matcher("low: [notice]\nhigh: [penalty, terminate]");
        let matches = m.match_clause("To terminate, give notice or pay a penalty.");
        assert_eq!(
            matches,
            vec![
                RiskMatch::new("low", "notice"),
                RiskMatch::new("high", "penalty"),
                RiskMatch::new("high", "terminate"),
            ]
        );
    }

    #[test]
    fn test_unknown_severity_passes_through() {
        let m = matcher("critical: [waive]");
        assert_eq!(m.match_clause("We waive all rights."), vec![RiskMatch::new("critical", "waive")]);
    }

    #[test]
    fn test_analyze_keeps_order_and_indices() {
        let m = matcher("high: [terminate]");
        let results = m.analyze(&["Payment is monthly.", "You may terminate.", "Notices in writing."]);
        assert_eq!(results.len(), 3);
        assert_eq!(
            results.iter().map(|r| r.index).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert_eq!(
            results.iter().map(|r| r.is_risky).collect::<Vec<_>>(),
            vec![false, true, false]
        );
        assert_eq!(results[1].clause, "You may terminate.");
    }

    #[test]
    fn test_analyze_empty() {
        let m = matcher("high: [terminate]");
        assert!(m.analyze::<String>(&[]).is_empty());
    }

    #[test]
    fn test_table_without_keywords_never_matches() {
        let m = matcher("high: []");
        let results = m.analyze(&["Either party may terminate on notice."]);
        assert_eq!(results.len(), 1);
        assert!(!results[0].is_risky);
    }
}
