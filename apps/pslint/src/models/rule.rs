//! Rule classification: owning section and wildcard/exception kind.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
/// Region of the registry a line belongs to.
pub enum Section {
    #[default]
    Outside,
    Icann,
    Private,
}

impl Section {
    pub fn begin_marker(self) -> Option<&'static str> {
        match self {
            Section::Icann => Some("// ===BEGIN ICANN DOMAINS==="),
            Section::Private => Some("// ===BEGIN PRIVATE DOMAINS==="),
            Section::Outside => None,
        }
    }

    pub fn end_marker(self) -> Option<&'static str> {
        match self {
            Section::Icann => Some("// ===END ICANN DOMAINS==="),
            Section::Private => Some("// ===END PRIVATE DOMAINS==="),
            Section::Outside => None,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Outside => f.write_str("outside"),
            Section::Icann => f.write_str("ICANN"),
            Section::Private => f.write_str("PRIVATE"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
/// Prefix kind of a rule. A rule is exactly one of these, so a wildcard
/// exception cannot be represented.
pub enum RuleKind {
    Plain,
    /// `*.` prefix
    Wildcard,
    /// `!` prefix
    Exception,
}

impl RuleKind {
    /// Rank of a rule-prefix character in canonical group order.
    pub fn sort_class(first: Option<char>) -> u8 {
        match first {
            Some('*') => 0,
            Some('!') => 1,
            _ => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
/// Flags stored for every registered rule.
pub struct RuleFlags {
    pub kind: RuleKind,
    pub section: Section,
}

impl RuleFlags {
    pub fn new(kind: RuleKind, section: Section) -> Self {
        Self { kind, section }
    }

    pub fn is_wildcard(&self) -> bool {
        self.kind == RuleKind::Wildcard
    }

    pub fn is_exception(&self) -> bool {
        self.kind == RuleKind::Exception
    }

    pub fn is_plain(&self) -> bool {
        self.kind == RuleKind::Plain
    }
}
