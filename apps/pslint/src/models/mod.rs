//! Shared data models for lint outputs and rule classification.

pub mod finding;
pub mod rule;

pub use finding::Finding;
pub use rule::{RuleFlags, RuleKind, Section};

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
/// Severity of a single diagnostic. Only errors affect the exit status.
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
/// A single lint issue with severity and location.
pub struct Issue {
    pub line: usize,
    pub rule: &'static str,
    pub severity: Severity,
    pub message: String,
    /// Echo of the offending line, when one is available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Extra lines printed after the issue (group order listings).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
    #[serde(skip)]
    pub finding: Finding,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Aggregated lint summary used by printers.
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
    pub rules: usize,
    pub lines: usize,
}

#[derive(Debug, Clone, Serialize)]
/// Lint results container for one registry source.
pub struct LintResult {
    pub file: String,
    pub issues: Vec<Issue>,
    pub summary: Summary,
}

impl LintResult {
    pub fn has_errors(&self) -> bool {
        self.summary.errors > 0
    }

    /// Findings in visitation order, without their rendering.
    pub fn findings(&self) -> Vec<&Finding> {
        self.issues.iter().map(|is| &is.finding).collect()
    }

    /// Issues reported for one line number.
    pub fn issues_at(&self, line: usize) -> Vec<&Issue> {
        self.issues.iter().filter(|is| is.line == line).collect()
    }
}
