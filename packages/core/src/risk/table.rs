//! Severity-tiered keyword table.
//!
//! The table is a YAML (or JSON) mapping from severity name to a list of
//! keywords:
//!
//! ```yaml
//! high:
//!   - terminate
//!   - penalty
//! medium:
//!   - indemnify
//! ```
//!
//! Declaration order of severities and keywords is kept; it decides the order
//! in which matches are reported.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;

use crate::config::MAX_RULES_SIZE;
use crate::error::{AnalysisError, Result};
use crate::types::Severity;

/// A keyword as configured, with its lower-cased form for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Keyword {
    pub(crate) text: String,
    pub(crate) lowered: String,
}

/// One severity and its keywords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeverityTier {
    severity: Severity,
    keywords: Vec<Keyword>,
}

impl SeverityTier {
    /// The tier's severity.
    #[must_use]
    pub fn severity(&self) -> &Severity {
        &self.severity
    }

    /// Keywords in declaration order, as configured.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(|k| k.text.as_str())
    }

    pub(crate) fn entries(&self) -> &[Keyword] {
        &self.keywords
    }

    /// Number of keywords in this tier.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    /// Whether this tier has no keywords.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

/// Ordered, read-only mapping of severity to keywords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskKeywordTable {
    tiers: Vec<SeverityTier>,
}

impl RiskKeywordTable {
    /// Load a keyword table from a YAML or JSON file.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::RulesNotFound` if the file cannot be read,
    /// `AnalysisError::RulesParse` if it is not a mapping of severity to
    /// keyword list, and `AnalysisError::InvalidRules` if its content is
    /// unusable (see [`RiskKeywordTable::from_entries`]).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "Loading risk keyword table");

        let content = fs::read_to_string(path).map_err(|source| AnalysisError::RulesNotFound {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content).map_err(|err| match err {
            AnalysisError::RulesParse { path: None, source } => AnalysisError::RulesParse {
                path: Some(path.to_path_buf()),
                source,
            },
            other => other,
        })
    }

    /// Parse a keyword table from a YAML or JSON string.
    ///
    /// # Errors
    ///
    /// Same as [`RiskKeywordTable::from_path`], minus the read failure.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Self::parse(content)
    }

    fn parse(content: &str) -> Result<Self> {
        if content.len() > MAX_RULES_SIZE {
            return Err(AnalysisError::InvalidRules(format!(
                "content exceeds maximum size limit ({MAX_RULES_SIZE} bytes)"
            )));
        }
        if content.trim().is_empty() {
            return Err(AnalysisError::InvalidRules("table is empty".to_string()));
        }

        let raw: RawTable =
            serde_yaml_ng::from_str(content).map_err(|source| AnalysisError::RulesParse { path: None, source })?;
        Self::from_entries(raw.0)
    }

    /// Build a table from `(severity, keywords)` pairs in the given order.
    ///
    /// Keywords are trimmed. Within one severity, case-insensitive duplicates
    /// collapse to their first occurrence.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidRules` for a blank severity name, a
    /// severity declared twice, or a blank keyword. A table without any
    /// keyword is accepted with a warning and never matches.
    pub fn from_entries<S, K>(entries: impl IntoIterator<Item = (S, Vec<K>)>) -> Result<Self>
    where
        S: Into<String>,
        K: Into<String>,
    {
        let mut tiers: Vec<SeverityTier> = Vec::new();

        for (severity, keywords) in entries {
            let severity: String = severity.into();
            let severity = severity.trim();
            if severity.is_empty() {
                return Err(AnalysisError::InvalidRules("severity name is blank".to_string()));
            }
            if tiers.iter().any(|t| t.severity.as_str() == severity) {
                return Err(AnalysisError::InvalidRules(format!(
                    "severity '{severity}' is declared more than once"
                )));
            }

            let mut seen = HashSet::new();
            let mut entries = Vec::new();
            for keyword in keywords {
                let keyword: String = keyword.into();
                let text = keyword.trim();
                if text.is_empty() {
                    return Err(AnalysisError::InvalidRules(format!(
                        "severity '{severity}' contains a blank keyword"
                    )));
                }
                let lowered = text.to_lowercase();
                if !seen.insert(lowered.clone()) {
                    tracing::warn!(severity, keyword = text, "Ignoring duplicate risk keyword");
                    continue;
                }
                entries.push(Keyword {
                    text: text.to_string(),
                    lowered,
                });
            }

            if entries.is_empty() {
                tracing::warn!(severity, "Severity has no keywords");
            }
            tiers.push(SeverityTier {
                severity: Severity::new(severity),
                keywords: entries,
            });
        }

        let table = Self { tiers };
        if table.keyword_count() == 0 {
            tracing::warn!(severities = table.len(), "Risk keyword table contains no keywords");
        }

        tracing::debug!(
            severities = table.len(),
            keywords = table.keyword_count(),
            "Parsed risk keyword table"
        );
        Ok(table)
    }

    /// Tiers in declaration order.
    #[must_use]
    pub fn tiers(&self) -> &[SeverityTier] {
        &self.tiers
    }

    /// Look up a tier by severity name.
    #[must_use]
    pub fn tier(&self, severity: &str) -> Option<&SeverityTier> {
        self.tiers.iter().find(|t| t.severity.as_str() == severity)
    }

    /// Total number of keywords across all tiers.
    #[must_use]
    pub fn keyword_count(&self) -> usize {
        self.tiers.iter().map(SeverityTier::len).sum()
    }

    /// Number of severities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// Whether the table declares no severity at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

/// Severity/keyword pairs exactly as they appear in the document.
struct RawTable(Vec<(String, Vec<String>)>);

impl<'de> Deserialize<'de> for RawTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct RawTableVisitor;

        impl<'de> Visitor<'de> for RawTableVisitor {
            type Value = RawTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping of severity to a list of keywords")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((severity, keywords)) = map.next_entry::<String, Vec<String>>()? {
                    entries.push((severity, keywords));
                }
                Ok(RawTable(entries))
            }

            fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
                Ok(RawTable(Vec::new()))
            }
        }

        deserializer.deserialize_map(RawTableVisitor)
    }
}
