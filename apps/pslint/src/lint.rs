//! Lint runner for public suffix registry files.
//!
//! A `Validator` owns all per-run state (section tracker, rule registry,
//! group buffer and diagnostics) and consumes one normalized line at a
//! time. Each input file gets its own validator; several files are linted
//! in parallel and reported in input order.

use crate::diagnostics::Diagnostics;
use crate::error::{LintError, Result};
use crate::models::{Finding, LintResult, Section};
use crate::order::{flush_group, Group};
use crate::rules::RuleValidator;
use crate::section::SectionTracker;
use crate::source::{read_lines, SourceLine};
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Name used for standard input, both on the command line and in reports.
pub const STDIN_NAME: &str = "-";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LintOptions {
    /// Run the group order check at blank lines, comment lines and end of
    /// input.
    pub check_order: bool,
}

#[derive(Debug)]
pub struct Validator {
    options: LintOptions,
    sections: SectionTracker,
    rules: RuleValidator,
    group: Group,
    diag: Diagnostics,
    lines: usize,
    rule_count: usize,
}

impl Validator {
    pub fn new(options: LintOptions) -> Self {
        Self {
            options,
            sections: SectionTracker::new(),
            rules: RuleValidator::new(),
            group: Group::new(),
            diag: Diagnostics::new(),
            lines: 0,
            rule_count: 0,
        }
    }

    pub fn section(&self) -> Section {
        self.sections.current()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diag
    }

    pub fn process(&mut self, line: &SourceLine) {
        let n = line.number;
        self.lines = n;
        if line.outer_whitespace {
            self.diag
                .report(n, Finding::LeadingTrailingWhitespace, Some(&line.original));
        }

        if line.is_blank() {
            self.group_boundary(n, None);
            return;
        }

        if line.is_comment() {
            self.group_boundary(n, Some(&line.original));
            if let Some(f) = self.sections.on_comment(&line.text) {
                self.diag.report(n, f, Some(&line.original));
            }
            return;
        }

        self.rule_count += 1;
        let section = self.sections.current();
        if section == Section::Outside {
            self.diag
                .report(n, Finding::RuleOutsideSection, Some(&line.original));
        }
        self.group.push_rule(&line.text);
        self.rules.check(line, section, &mut self.diag);
    }

    fn group_boundary(&mut self, line: usize, text: Option<&str>) {
        if self.options.check_order {
            flush_group(&mut self.group, &mut self.diag, line, text);
        }
    }

    /// Close the run: final group check, then section structure findings.
    pub fn finish(mut self, file: impl Into<String>) -> LintResult {
        let last = self.lines;
        self.group_boundary(last, None);
        for f in self.sections.finish() {
            self.diag.report(last, f, None);
        }
        let file = file.into();
        tracing::debug!(
            file = %file,
            lines = last,
            rules = self.rule_count,
            registered = self.rules.registry().len(),
            errors = self.diag.errors(),
            warnings = self.diag.warnings(),
            "lint finished"
        );
        let (issues, summary) = self.diag.finish(self.rule_count, last);
        LintResult {
            file,
            issues,
            summary,
        }
    }
}

/// Lint an in-memory registry.
pub fn lint_bytes(data: &[u8], name: &str, options: LintOptions) -> LintResult {
    let mut v = Validator::new(options);
    for (idx, raw) in data.split_inclusive(|b| *b == b'\n').enumerate() {
        v.process(&SourceLine::from_bytes(idx + 1, raw));
    }
    v.finish(name)
}

pub fn lint_str(text: &str, options: LintOptions) -> LintResult {
    lint_bytes(text.as_bytes(), STDIN_NAME, options)
}

/// Lint a line source. A read error aborts the run.
pub fn lint_reader<R: BufRead>(reader: R, name: &str, options: LintOptions) -> Result<LintResult> {
    tracing::debug!(file = name, ?options, "lint started");
    let mut v = Validator::new(options);
    for line in read_lines(reader) {
        let line = line.map_err(|source| LintError::Read {
            name: name.to_string(),
            line: v.lines,
            source,
        })?;
        v.process(&line);
    }
    Ok(v.finish(name))
}

/// Lint a file, or standard input when `path` is `-`.
pub fn lint_path(path: &Path, name: &str, options: LintOptions) -> Result<LintResult> {
    if path.as_os_str() == STDIN_NAME {
        let stdin = io::stdin();
        return lint_reader(stdin.lock(), name, options);
    }
    let file = File::open(path).map_err(|source| LintError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    lint_reader(BufReader::new(file), name, options)
}

/// Path shown in reports: relative to `repo_root` when possible.
pub fn display_name(path: &Path, repo_root: &Path) -> String {
    if path.as_os_str() == STDIN_NAME {
        return STDIN_NAME.to_string();
    }
    let abs = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };
    let root = if repo_root.is_absolute() {
        repo_root.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(repo_root))
            .unwrap_or_else(|_| repo_root.to_path_buf())
    };
    match pathdiff::diff_paths(&abs, &root) {
        Some(rel) if !rel.starts_with("..") => rel.to_string_lossy().to_string(),
        _ => path.to_string_lossy().to_string(),
    }
}

/// Lint every path independently. Results keep input order; files that
/// could not be read are returned as errors alongside.
pub fn run_lint(
    paths: &[PathBuf],
    repo_root: &Path,
    options: LintOptions,
) -> (Vec<LintResult>, Vec<LintError>) {
    let outcomes: Vec<Result<LintResult>> = paths
        .par_iter()
        .map(|p| lint_path(p, &display_name(p, repo_root), options))
        .collect();
    let mut results = Vec::new();
    let mut errors = Vec::new();
    for o in outcomes {
        match o {
            Ok(r) => results.push(r),
            Err(e) => errors.push(e),
        }
    }
    (results, errors)
}
