//! Group order checking.
//!
//! Consecutive rules form a group. Each entry is stored with its labels
//! reversed (top-level label first). A group is in canonical order when it
//! is sorted by `(label count, prefix class of the leftmost label, labels)`,
//! where the prefix class ranks `*` before `!` before anything else.

use crate::diagnostics::Diagnostics;
use crate::models::{Finding, RuleKind};
use std::cmp::Ordering;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Group {
    entries: Vec<Vec<String>>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule as written (prefix included).
    pub fn push_rule(&mut self, text: &str) {
        self.entries
            .push(text.split('.').rev().map(str::to_string).collect());
    }

    pub fn entries(&self) -> &[Vec<String>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

fn sort_key(labels: &[String]) -> (usize, u8, &[String]) {
    let first = labels.last().and_then(|l| l.chars().next());
    (labels.len(), RuleKind::sort_class(first), labels)
}

/// Stable canonical ordering of reversed-label entries.
pub fn canonical_order(entries: &[Vec<String>]) -> Vec<Vec<String>> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
    sorted
}

/// Restore normal dotted order from reversed labels.
pub fn to_domain(labels: &[String]) -> String {
    labels
        .iter()
        .rev()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(".")
}

fn render_group(entries: &[Vec<String>]) -> String {
    let domains: Vec<String> = entries.iter().map(|l| to_domain(l)).collect();
    format!("[{}]", domains.join(", "))
}

/// Check and clear `group`.
///
/// Skipped once when an error was reported since the previous check, and
/// for groups of fewer than two entries. The buffer is cleared either way.
pub fn flush_group(group: &mut Group, diag: &mut Diagnostics, line: usize, text: Option<&str>) {
    let skip = diag.take_skip_order_check();
    if skip || group.len() < 2 {
        tracing::trace!(line, skip, size = group.len(), "group check skipped");
        group.clear();
        return;
    }
    let entries = group.entries();
    let tld = entries[0].first();
    if entries.iter().any(|labels| labels.first() != tld) {
        diag.report(line, Finding::InconsistentGroupTld, text);
    }
    let sorted = canonical_order(entries);
    if sorted.as_slice() != entries {
        let mut details = vec![
            format!("  {}", render_group(entries)),
            format!("  {}", render_group(&sorted)),
            "Correct sorting would be:".to_string(),
        ];
        details.extend(sorted.iter().map(|l| to_domain(l)));
        diag.report_with_details(line, Finding::UnsortedGroup, text, details);
    }
    group.clear();
}

/// Whether suffix `a` may precede suffix `b` within a submission.
///
/// Labels are compared from the top-level label inward. An empty top-level
/// label on either side is treated as ordered.
pub fn suffix_is_less(a: &[&str], b: &[&str]) -> bool {
    if a.last().map_or(true, |l| l.is_empty()) || b.last().map_or(true, |l| l.is_empty()) {
        return true;
    }
    let mut left = a.iter().rev();
    let mut right = b.iter().rev();
    loop {
        match (left.next(), right.next()) {
            (Some(x), Some(y)) => match x.cmp(y) {
                Ordering::Greater => return false,
                Ordering::Less => return true,
                Ordering::Equal => {}
            },
            (Some(_), None) => return false,
            (None, _) => return true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn group_of(rules: &[&str]) -> Group {
        let mut g = Group::new();
        for r in rules {
            g.push_rule(r);
        }
        g
    }

    #[test]
    fn test_canonical_order_of_wildcard_plain_group() {
        let input = vec![
            labels(&["com", "example", "*"]),
            labels(&["com", "example", "a"]),
            labels(&["com", "example"]),
        ];
        let sorted = canonical_order(&input);
        assert_eq!(
            sorted,
            vec![
                labels(&["com", "example"]),
                labels(&["com", "example", "*"]),
                labels(&["com", "example", "a"]),
            ]
        );
    }

    #[test]
    fn test_exception_sorts_between_wildcard_and_plain() {
        let input = vec![
            labels(&["ck", "www"]),
            labels(&["ck", "!www"]),
            labels(&["ck", "*"]),
        ];
        let sorted = canonical_order(&input);
        assert_eq!(
            sorted,
            vec![
                labels(&["ck", "*"]),
                labels(&["ck", "!www"]),
                labels(&["ck", "www"]),
            ]
        );
    }

    #[test]
    fn test_unsorted_group_warns_with_both_orderings() {
        let mut g = group_of(&["*.example.com", "a.example.com", "example.com"]);
        let mut d = Diagnostics::new();
        flush_group(&mut g, &mut d, 9, None);
        assert!(g.is_empty());
        assert_eq!(d.warnings(), 1);
        let issue = &d.issues()[0];
        assert_eq!(issue.finding, Finding::UnsortedGroup);
        assert_eq!(issue.line, 9);
        assert_eq!(
            issue.details,
            vec![
                "  [*.example.com, a.example.com, example.com]".to_string(),
                "  [example.com, *.example.com, a.example.com]".to_string(),
                "Correct sorting would be:".to_string(),
                "example.com".to_string(),
                "*.example.com".to_string(),
                "a.example.com".to_string(),
            ]
        );
    }

    #[test]
    fn test_sorted_group_is_silent() {
        let mut g = group_of(&["example.com", "*.example.com", "a.example.com"]);
        let mut d = Diagnostics::new();
        flush_group(&mut g, &mut d, 4, None);
        assert!(d.issues().is_empty());
    }

    #[test]
    fn test_inconsistent_tld() {
        let mut g = group_of(&["b.net", "a.com"]);
        let mut d = Diagnostics::new();
        flush_group(&mut g, &mut d, 3, Some("// next"));
        let found: Vec<Finding> = d.issues().iter().map(|i| i.finding.clone()).collect();
        assert_eq!(
            found,
            vec![Finding::InconsistentGroupTld, Finding::UnsortedGroup]
        );
        assert_eq!(d.issues()[0].text.as_deref(), Some("// next"));
    }

    #[test]
    fn test_pending_error_skips_one_check_and_clears_group() {
        let mut d = Diagnostics::new();
        d.report(1, Finding::IllegalCharacter, None);
        let mut g = group_of(&["b.com", "a.com"]);
        flush_group(&mut g, &mut d, 2, None);
        assert!(g.is_empty());
        assert_eq!(d.warnings(), 0);

        let mut g = group_of(&["b.com", "a.com"]);
        flush_group(&mut g, &mut d, 3, None);
        assert_eq!(d.warnings(), 1);
    }

    #[test]
    fn test_suffix_is_less() {
        assert!(suffix_is_less(&["a", "com"], &["b", "com"]));
        assert!(!suffix_is_less(&["b", "com"], &["a", "com"]));
        assert!(suffix_is_less(&["example", "com"], &["example", "net"]));
        assert!(suffix_is_less(&["com"], &["a", "com"]));
        assert!(!suffix_is_less(&["a", "com"], &["com"]));
        assert!(suffix_is_less(&["com"], &["com"]));
        assert!(suffix_is_less(&["a", ""], &["b", "com"]));
        assert!(suffix_is_less(&[], &["com"]));
    }

    #[test]
    fn test_suffix_is_less_handles_deep_names_iteratively() {
        let deep: Vec<String> = (0..100_000).map(|i| format!("l{}", i % 7)).collect();
        let a: Vec<&str> = deep.iter().map(String::as_str).collect();
        let mut b = a.clone();
        b[0] = "z";
        assert!(suffix_is_less(&a, &b));
        assert!(!suffix_is_less(&b, &a));
    }
}
