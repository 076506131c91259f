//! Core data types for clause analysis.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A named risk tier such as `high`, `medium` or `low`.
///
/// The set of tiers is data-driven: whatever severities the keyword table
/// declares are accepted and passed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Severity(String);

impl Severity {
    /// Conventional tier for the most serious findings.
    pub const HIGH: &'static str = "high";
    /// Conventional middle tier.
    pub const MEDIUM: &'static str = "medium";
    /// Conventional tier for minor findings.
    pub const LOW: &'static str = "low";

    /// Create a severity from its name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the severity name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Severity {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Evidence that a keyword of a severity tier occurs in a clause.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RiskMatch {
    /// Tier the keyword belongs to.
    pub severity: Severity,

    /// Keyword as written in the keyword table.
    pub keyword: String,
}

impl RiskMatch {
    /// Create a new match.
    #[must_use]
    pub fn new(severity: impl Into<Severity>, keyword: impl Into<String>) -> Self {
        Self {
            severity: severity.into(),
            keyword: keyword.into(),
        }
    }
}

/// Risk assessment of a single clause.
///
/// Produced once per clause by the risk matcher and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseAnalysis {
    /// Zero-based position of the clause in the document.
    pub index: usize,

    /// The clause text.
    pub clause: String,

    /// Matches in keyword table order.
    pub matches: Vec<RiskMatch>,

    /// True iff `matches` is non-empty.
    pub is_risky: bool,
}

impl ClauseAnalysis {
    /// Create a new analysis record; `is_risky` is derived from `matches`.
    #[must_use]
    pub fn new(index: usize, clause: impl Into<String>, matches: Vec<RiskMatch>) -> Self {
        let is_risky = !matches.is_empty();
        Self {
            index,
            clause: clause.into(),
            matches,
            is_risky,
        }
    }

    /// Group matched keywords by severity, keeping first-seen severity order.
    #[must_use]
    pub fn keywords_by_severity(&self) -> Vec<(&Severity, Vec<&str>)> {
        let mut groups: Vec<(&Severity, Vec<&str>)> = Vec::new();
        for m in &self.matches {
            match groups.iter_mut().find(|(severity, _)| *severity == &m.severity) {
                Some((_, keywords)) => keywords.push(m.keyword.as_str()),
                None => groups.push((&m.severity, vec![m.keyword.as_str()])),
            }
        }
        groups
    }
}

/// Segmentation and risk results for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    /// Severity tiers of the keyword table, in table order.
    #[serde(default)]
    pub severities: Vec<Severity>,

    /// Clauses in document order.
    pub clauses: Vec<String>,

    /// One record per clause, same order as `clauses`.
    pub results: Vec<ClauseAnalysis>,
}

impl DocumentAnalysis {
    /// Records flagged as risky.
    pub fn risky(&self) -> impl Iterator<Item = &ClauseAnalysis> {
        self.results.iter().filter(|r| r.is_risky)
    }

    /// Number of risky clauses.
    #[must_use]
    pub fn risky_count(&self) -> usize {
        self.risky().count()
    }

    /// Total matches per severity.
    ///
    /// Every tier in `severities` is listed in table order, including tiers
    /// without matches. Severities missing from `severities` follow in order
    /// of first appearance.
    #[must_use]
    pub fn severity_counts(&self) -> Vec<(Severity, usize)> {
        let mut counts: Vec<(Severity, usize)> = self.severities.iter().map(|s| (s.clone(), 0)).collect();
        for m in self.results.iter().flat_map(|r| &r.matches) {
            match counts.iter_mut().find(|(severity, _)| *severity == m.severity) {
                Some((_, count)) => *count += 1,
                None => counts.push((m.severity.clone(), 1)),
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_basics() {
        let high = Severity::new("high");
        assert_eq!(high.as_str(), "high");
        assert_eq!(high.to_string(), "high");
        assert_eq!(Severity::from("critical").as_str(), "critical");
    }

    #[test]
    fn test_clause_analysis_derives_is_risky() {
        let risky = ClauseAnalysis::new(0, "text", vec![RiskMatch::new("high", "terminate")]);
        assert!(risky.is_risky);

        let safe = ClauseAnalysis::new(1, "text", Vec::new());
        assert!(!safe.is_risky);
    }

    #[test]
    fn test_keywords_by_severity() {
        let analysis = ClauseAnalysis::new(
            0,
            "text",
            vec![
                RiskMatch::new("high", "terminate"),
                RiskMatch::new("low", "notice"),
                RiskMatch::new("high", "penalty"),
            ],
        );
        let groups = analysis.keywords_by_severity();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0.as_str(), "high");
        assert_eq!(groups[0].1, vec!["terminate", "penalty"]);
        assert_eq!(groups[1].0.as_str(), "low");
        assert_eq!(groups[1].1, vec!["notice"]);
    }

    #[test]
    fn test_match_serializes_flat() {
        let json = serde_json::to_value(RiskMatch::new("high", "terminate")).unwrap();
        assert_eq!(json, serde_json::json!({"severity": "high", "keyword": "terminate"}));
    }

    #[test]
    fn test_document_severity_counts() {
        let doc = DocumentAnalysis {
            severities: Vec::new(),
            clauses: vec!["a".into(), "b".into(), "c".into()],
            results: vec![
                ClauseAnalysis::new(0, "a", vec![RiskMatch::new("medium", "indemnify")]),
                ClauseAnalysis::new(1, "b", Vec::new()),
                ClauseAnalysis::new(
                    2,
                    "c",
                    vec![RiskMatch::new("high", "penalty"), RiskMatch::new("medium", "liable")],
                ),
            ],
        };
        assert_eq!(doc.risky_count(), 2);
        assert_eq!(
            doc.severity_counts(),
            vec![(Severity::new("medium"), 2), (Severity::new("high"), 1)]
        );
    }

    #[test]
    fn test_severity_counts_follow_table_order() {
        // "low" is matched before "high" in the document.
        let doc = DocumentAnalysis {
            severities: vec![Severity::new("high"), Severity::new("medium"), Severity::new("low")],
            clauses: vec!["a".into(), "b".into()],
            results: vec![
                ClauseAnalysis::new(0, "a", vec![RiskMatch::new("low", "notice")]),
                ClauseAnalysis::new(1, "b", vec![RiskMatch::new("high", "terminate")]),
            ],
        };
        assert_eq!(
            doc.severity_counts(),
            vec![
                (Severity::new("high"), 1),
                (Severity::new("medium"), 0),
                (Severity::new("low"), 1)
            ]
        );
    }

    #[test]
    fn test_severity_counts_append_undeclared_severities() {
        let doc = DocumentAnalysis {
            severities: vec![Severity::new("high")],
            clauses: vec!["a".into()],
            results: vec![ClauseAnalysis::new(0, "a", vec![RiskMatch::new("critical", "waive")])],
        };
        assert_eq!(
            doc.severity_counts(),
            vec![(Severity::new("high"), 0), (Severity::new("critical"), 1)]
        );
    }
}
