//! Rendering of analysis results for the terminal and as JSON.

use clap::ValueEnum;
use console::style;
use serde::Serialize;
use textwrap::Options;

use clausewise_core::{ClauseAnalysis, DocumentAnalysis, RiskKeywordTable, Severity};

use crate::error::Result;

/// Width used to wrap clause text in text output.
pub const TEXT_WRAP_WIDTH: usize = 88;

/// Output format of the analysis commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Matches per severity, in keyword table order.
#[derive(Debug, Serialize)]
pub struct SeverityCount {
    pub severity: Severity,
    pub count: usize,
}

/// JSON report of an analysed document.
#[derive(Debug, Serialize)]
pub struct AnalysisReport<'a> {
    pub clause_count: usize,
    pub risky_count: usize,
    pub severity_counts: Vec<SeverityCount>,
    pub results: Vec<&'a ClauseAnalysis>,
}

impl<'a> AnalysisReport<'a> {
    pub fn new(analysis: &'a DocumentAnalysis, risky_only: bool) -> Self {
        Self {
            clause_count: analysis.clauses.len(),
            risky_count: analysis.risky_count(),
            severity_counts: analysis
                .severity_counts()
                .into_iter()
                .map(|(severity, count)| SeverityCount { severity, count })
                .collect(),
            results: analysis.results.iter().filter(|r| !risky_only || r.is_risky).collect(),
        }
    }
}

/// Render a severity as a colored badge such as `[HIGH]`.
fn badge(severity: &Severity) -> String {
    let label = format!("[{}]", severity.as_str().to_uppercase());
    let styled = match severity.as_str() {
        Severity::HIGH => style(label).red().bold(),
        Severity::MEDIUM => style(label).yellow().bold(),
        Severity::LOW => style(label).cyan(),
        _ => style(label).magenta(),
    };
    styled.to_string()
}

fn wrap_clause(clause: &str) -> String {
    let options = Options::new(TEXT_WRAP_WIDTH).initial_indent("    ").subsequent_indent("    ");
    textwrap::fill(clause, options)
}

/// Render clauses as a numbered list.
pub fn render_clauses_text(clauses: &[String]) -> String {
    let mut out = String::new();
    for (i, clause) in clauses.iter().enumerate() {
        out.push_str(&format!("{}\n{}\n\n", style(format!("Clause {}", i + 1)).bold(), wrap_clause(clause)));
    }
    out.push_str(&format!("{} clauses\n", clauses.len()));
    out
}

/// Render clauses as a JSON array.
pub fn render_clauses_json(clauses: &[String]) -> Result<String> {
    Ok(serde_json::to_string_pretty(clauses)?)
}

/// Render an analysis with risk badges under each clause.
pub fn render_analysis_text(analysis: &DocumentAnalysis, risky_only: bool) -> String {
    let mut out = String::new();

    for result in analysis.results.iter().filter(|r| !risky_only || r.is_risky) {
        let heading = format!("Clause {}", result.index + 1);
        if result.is_risky {
            out.push_str(&format!("{}\n", style(heading).bold()));
            for (severity, keywords) in result.keywords_by_severity() {
                out.push_str(&format!("  {} {}\n", badge(severity), keywords.join(", ")));
            }
        } else {
            out.push_str(&format!("{}\n", style(heading).dim()));
        }
        out.push_str(&wrap_clause(&result.clause));
        out.push_str("\n\n");
    }

    out.push_str(&format!(
        "{} clauses, {} risky\n",
        analysis.clauses.len(),
        style(analysis.risky_count()).bold()
    ));
    for (severity, count) in analysis.severity_counts() {
        out.push_str(&format!("  {} {count}\n", badge(&severity)));
    }
    out
}

/// Render an analysis as JSON.
pub fn render_analysis_json(analysis: &DocumentAnalysis, risky_only: bool) -> Result<String> {
    Ok(serde_json::to_string_pretty(&AnalysisReport::new(analysis, risky_only))?)
}

/// Render a keyword table overview.
pub fn render_table_summary(table: &RiskKeywordTable) -> String {
    let mut out = format!(
        "{} keywords in {} severities\n",
        table.keyword_count(),
        table.len()
    );
    for tier in table.tiers() {
        out.push_str(&format!("  {} {}\n", badge(tier.severity()), tier.len()));
    }
    out
}
