//! Submission order analysis for the PRIVATE section.
//!
//! Private entries are grouped under a header comment of the form
//! `// Organization Name : https://example.org`. Headers are expected in
//! case-insensitive alphabetical order, and the rules below each header in
//! suffix order (see `order::suffix_is_less`).

use crate::error::{LintError, Result};
use crate::lint::STDIN_NAME;
use crate::models::Section;
use crate::order::suffix_is_less;
use crate::source::{read_lines, SourceLine};
use regex::Regex;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::OnceLock;

fn header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^// .* *: *https?://.*").expect("valid header regex"))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MisorderedPair {
    pub line: usize,
    pub before: String,
    pub after: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub title: String,
    pub line: usize,
    pub rules: usize,
    pub misordered: Vec<MisorderedPair>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubmissionReport {
    pub file: String,
    pub misordered_titles: Vec<MisorderedPair>,
    pub submissions: Vec<Submission>,
}

impl SubmissionReport {
    pub fn is_clean(&self) -> bool {
        self.misordered_titles.is_empty() && self.submissions.iter().all(|s| s.misordered.is_empty())
    }

    pub fn misordered_domains(&self) -> usize {
        self.submissions.iter().map(|s| s.misordered.len()).sum()
    }
}

/// Title of a submission header, or `None` for other lines.
pub fn header_title(text: &str) -> Option<String> {
    if !header_re().is_match(text) {
        return None;
    }
    let body = text.strip_prefix("//").unwrap_or(text);
    let title = body.split(':').next().unwrap_or(body).trim();
    Some(title.to_string())
}

#[derive(Default)]
struct Analyzer {
    report: SubmissionReport,
    in_private: bool,
    current: Option<Submission>,
    previous_rule: Option<String>,
}

impl Analyzer {
    fn process(&mut self, line: &SourceLine) {
        let text = line.text.as_str();
        if Section::Private.begin_marker() == Some(text) {
            self.in_private = true;
            return;
        }
        if !self.in_private {
            return;
        }
        if Section::Private.end_marker() == Some(text) {
            self.close();
            self.in_private = false;
            return;
        }
        if let Some(title) = header_title(text) {
            self.close();
            if let Some(prev) = self.report.submissions.last() {
                if prev.title.to_lowercase() > title.to_lowercase() {
                    self.report.misordered_titles.push(MisorderedPair {
                        line: line.number,
                        before: prev.title.clone(),
                        after: title.clone(),
                    });
                }
            }
            self.current = Some(Submission {
                title,
                line: line.number,
                rules: 0,
                misordered: Vec::new(),
            });
            return;
        }
        if line.is_blank() || line.is_comment() {
            return;
        }
        let Some(sub) = self.current.as_mut() else {
            return;
        };
        sub.rules += 1;
        if let Some(prev) = self.previous_rule.as_deref() {
            let a: Vec<&str> = prev.split('.').collect();
            let b: Vec<&str> = text.split('.').collect();
            if !suffix_is_less(&a, &b) {
                sub.misordered.push(MisorderedPair {
                    line: line.number,
                    before: prev.to_string(),
                    after: text.to_string(),
                });
            }
        }
        self.previous_rule = Some(text.to_string());
    }

    fn close(&mut self) {
        if let Some(sub) = self.current.take() {
            self.report.submissions.push(sub);
        }
        self.previous_rule = None;
    }

    fn finish(mut self, file: &str) -> SubmissionReport {
        self.close();
        self.report.file = file.to_string();
        tracing::debug!(
            file,
            submissions = self.report.submissions.len(),
            misordered_titles = self.report.misordered_titles.len(),
            misordered_domains = self.report.misordered_domains(),
            "submission analysis finished"
        );
        self.report
    }
}

pub fn analyze_str(text: &str) -> SubmissionReport {
    let mut a = Analyzer::default();
    for (idx, raw) in text.as_bytes().split_inclusive(|b| *b == b'\n').enumerate() {
        a.process(&SourceLine::from_bytes(idx + 1, raw));
    }
    a.finish(STDIN_NAME)
}

pub fn analyze_reader<R: BufRead>(reader: R, name: &str) -> Result<SubmissionReport> {
    let mut a = Analyzer::default();
    let mut last = 0;
    for line in read_lines(reader) {
        let line = line.map_err(|source| LintError::Read {
            name: name.to_string(),
            line: last,
            source,
        })?;
        last = line.number;
        a.process(&line);
    }
    Ok(a.finish(name))
}

pub fn analyze_path(path: &Path, name: &str) -> Result<SubmissionReport> {
    if path.as_os_str() == STDIN_NAME {
        return analyze_reader(io::stdin().lock(), name);
    }
    let file = File::open(path).map_err(|source| LintError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    analyze_reader(BufReader::new(file), name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEAD: &str = "// ===BEGIN ICANN DOMAINS===\nzz\n// ===END ICANN DOMAINS===\n\
                        // ===BEGIN PRIVATE DOMAINS===\n";
    const TAIL: &str = "// ===END PRIVATE DOMAINS===\n";

    #[test]
    fn test_header_title() {
        assert_eq!(
            header_title("// Acme Corp : https://acme.example"),
            Some("Acme Corp".to_string())
        );
        assert_eq!(
            header_title("// Beta: http://beta.example/about"),
            Some("Beta".to_string())
        );
        assert_eq!(header_title("// Submitted by someone"), None);
        assert_eq!(header_title("acme.example"), None);
    }

    #[test]
    fn test_ordered_private_section_is_clean() {
        let text = format!(
            "{HEAD}// Acme : https://acme.example\nacme.example\n*.acme.example\n\n\
             // beta : https://beta.example\n// Submitted by B\nb.beta.example\nc.beta.example\n{TAIL}"
        );
        let rep = analyze_str(&text);
        assert!(rep.is_clean(), "{rep:?}");
        assert_eq!(rep.submissions.len(), 2);
        assert_eq!(rep.submissions[0].rules, 2);
        assert_eq!(rep.submissions[1].title, "beta");
    }

    #[test]
    fn test_misordered_titles_are_case_insensitive() {
        let text = format!(
            "{HEAD}// beta : https://beta.example\nbeta.example\n\
             // Acme : https://acme.example\nacme.example\n{TAIL}"
        );
        let rep = analyze_str(&text);
        assert_eq!(
            rep.misordered_titles,
            vec![MisorderedPair {
                line: 7,
                before: "beta".into(),
                after: "Acme".into()
            }]
        );
    }

    #[test]
    fn test_misordered_domains_include_last_rule() {
        let text = format!(
            "{HEAD}// Acme : https://acme.example\nb.acme.example\na.acme.example\n{TAIL}"
        );
        let rep = analyze_str(&text);
        assert!(!rep.is_clean());
        assert_eq!(
            rep.submissions[0].misordered,
            vec![MisorderedPair {
                line: 7,
                before: "b.acme.example".into(),
                after: "a.acme.example".into()
            }]
        );
        assert_eq!(rep.misordered_domains(), 1);
    }

    #[test]
    fn test_icann_section_is_ignored() {
        let text = "// ===BEGIN ICANN DOMAINS===\n// Zed : https://z.example\nb.z\na.z\n\
                    // ===END ICANN DOMAINS===\n";
        let rep = analyze_str(text);
        assert!(rep.submissions.is_empty());
        assert!(rep.is_clean());
    }
}
