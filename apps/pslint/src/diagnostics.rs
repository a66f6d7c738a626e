//! Diagnostics sink shared by every validation stage.
//!
//! Counts warnings and errors, keeps issues in emission order and remembers
//! whether an error was reported since the last group order check so that
//! check can be skipped once.

use crate::models::{Finding, Issue, Severity, Summary};

#[derive(Debug, Default)]
pub struct Diagnostics {
    issues: Vec<Issue>,
    warnings: usize,
    errors: usize,
    skip_order_check: bool,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `finding` at `line`, echoing `text` when given.
    pub fn report(&mut self, line: usize, finding: Finding, text: Option<&str>) {
        self.report_with_details(line, finding, text, Vec::new());
    }

    pub fn report_with_details(
        &mut self,
        line: usize,
        finding: Finding,
        text: Option<&str>,
        details: Vec<String>,
    ) {
        let severity = finding.severity();
        match severity {
            Severity::Warning => self.warnings += 1,
            Severity::Error => {
                self.errors += 1;
                self.skip_order_check = true;
            }
        }
        tracing::trace!(line, code = finding.code(), "diagnostic");
        self.issues.push(Issue {
            line,
            rule: finding.code(),
            severity,
            message: finding.to_string(),
            text: text.map(str::to_string),
            details,
            finding,
        });
    }

    /// Consume the pending skip request left by the last error.
    pub fn take_skip_order_check(&mut self) -> bool {
        std::mem::take(&mut self.skip_order_check)
    }

    pub fn errors(&self) -> usize {
        self.errors
    }

    pub fn warnings(&self) -> usize {
        self.warnings
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn finish(self, rules: usize, lines: usize) -> (Vec<Issue>, Summary) {
        let summary = Summary {
            errors: self.errors,
            warnings: self.warnings,
            rules,
            lines,
        };
        (self.issues, summary)
    }
}
