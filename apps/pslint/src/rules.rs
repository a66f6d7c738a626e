//! Rule validation and the duplicate/exception tracker.
//!
//! A rule line is checked for encoding, NFKC normalization, case, prefix
//! structure and per-label grammar, then registered under its canonical
//! (prefix-stripped) text. The registry lives for the whole run and is used
//! both for doublette detection and to verify that every exception follows a
//! wildcard for its parent domain.

use crate::diagnostics::Diagnostics;
use crate::models::{Finding, RuleFlags, RuleKind, Section};
use crate::source::SourceLine;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// First registration of a canonical rule text.
pub struct RegistryEntry {
    pub line: usize,
    pub flags: RuleFlags,
}

#[derive(Debug, Default)]
pub struct RuleRegistry {
    entries: HashMap<String, RegistryEntry>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `canonical` unless it is already known; returns the earlier
    /// entry in that case and leaves it untouched.
    pub fn insert(&mut self, canonical: &str, line: usize, flags: RuleFlags) -> Option<RegistryEntry> {
        match self.entries.entry(canonical.to_string()) {
            Entry::Occupied(e) => Some(*e.get()),
            Entry::Vacant(e) => {
                e.insert(RegistryEntry { line, flags });
                None
            }
        }
    }

    pub fn get(&self, canonical: &str) -> Option<&RegistryEntry> {
        self.entries.get(canonical)
    }

    pub fn has_wildcard(&self, canonical: &str) -> bool {
        self.get(canonical).is_some_and(|e| e.flags.is_wildcard())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split a leading `*.` or `!` off a rule.
pub fn split_prefix(text: &str) -> (RuleKind, &str) {
    if let Some(rest) = text.strip_prefix("*.") {
        (RuleKind::Wildcard, rest)
    } else if let Some(rest) = text.strip_prefix('!') {
        (RuleKind::Exception, rest)
    } else {
        (RuleKind::Plain, text)
    }
}

/// Grammar of a single label. Non-ASCII characters are accepted as is.
pub fn check_label(label: &str) -> Option<Finding> {
    if label.is_empty() {
        return Some(Finding::EmptyLabel);
    }
    if label.starts_with("xn--") {
        return Some(Finding::Punycode);
    }
    if label.contains("--") {
        return Some(Finding::DoubleMinus);
    }
    label
        .chars()
        .any(|c| c.is_ascii() && !c.is_ascii_alphanumeric() && c != '-')
        .then_some(Finding::IllegalCharacter)
}

pub fn is_nfkc(text: &str) -> bool {
    text.nfkc().eq(text.chars())
}

pub fn is_lowercase(text: &str) -> bool {
    text.to_lowercase() == text
}

#[derive(Debug, Default)]
pub struct RuleValidator {
    registry: RuleRegistry,
}

impl RuleValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Validate one rule line owned by `section`.
    ///
    /// Returns the derived flags, or `None` when the line was abandoned
    /// (bad encoding, wildcard combined with exception) and therefore not
    /// registered.
    pub fn check(
        &mut self,
        line: &SourceLine,
        section: Section,
        diag: &mut Diagnostics,
    ) -> Option<RuleFlags> {
        let n = line.number;
        let echo = Some(line.original.as_str());
        if !line.valid_utf8 {
            diag.report(n, Finding::InvalidEncoding, Some(&line.text));
            return None;
        }
        let text = line.text.as_str();
        if !is_nfkc(text) {
            diag.report(n, Finding::NotNfkc, echo);
        }
        if !is_lowercase(text) {
            diag.report(n, Finding::NotLowercase, echo);
        }

        let (kind, canonical) = split_prefix(text);
        if kind == RuleKind::Wildcard && canonical.starts_with('!') {
            diag.report(n, Finding::WildcardAndException, echo);
            return None;
        }
        let flags = RuleFlags::new(kind, section);

        let labels: Vec<&str> = canonical.split('.').collect();
        if flags.is_exception() && labels.len() > 1 {
            let parent = labels[1..].join(".");
            if !self.registry.has_wildcard(&parent) {
                diag.report(n, Finding::ExceptionWithoutWildcard, echo);
            }
        }
        for label in &labels {
            if let Some(f) = check_label(label) {
                diag.report(n, f, echo);
            }
        }

        if let Some(prev) = self.registry.insert(canonical, n, flags) {
            diag.report(
                n,
                Finding::Doublette {
                    previous_line: prev.line,
                },
                echo,
            );
        }
        Some(flags)
    }
}
