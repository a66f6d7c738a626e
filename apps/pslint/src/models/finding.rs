//! Catalogue of everything the registry linter can report.
//!
//! Each variant knows its severity, a stable kebab-case code (used as the
//! `rule` field in JSON output) and the human message printed after the
//! severity token.

use super::{Section, Severity};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    LeadingTrailingWhitespace,
    UnknownSectionBegin,
    EndWithoutBegin,
    UnexpectedBegin,
    UnexpectedEnd,
    SectionNotClosed(Section),
    MissingSection(Section),
    RepeatedSection(Section, usize),
    RuleOutsideSection,
    InvalidEncoding,
    NotNfkc,
    NotLowercase,
    WildcardAndException,
    ExceptionWithoutWildcard,
    EmptyLabel,
    Punycode,
    DoubleMinus,
    IllegalCharacter,
    Doublette { previous_line: usize },
    InconsistentGroupTld,
    UnsortedGroup,
}

impl Finding {
    pub fn severity(&self) -> Severity {
        match self {
            Finding::LeadingTrailingWhitespace
            | Finding::MissingSection(_)
            | Finding::RepeatedSection(..)
            | Finding::InconsistentGroupTld
            | Finding::UnsortedGroup => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Finding::LeadingTrailingWhitespace => "whitespace",
            Finding::UnknownSectionBegin => "unknown-section",
            Finding::EndWithoutBegin => "end-without-begin",
            Finding::UnexpectedBegin => "unexpected-begin",
            Finding::UnexpectedEnd => "unexpected-end",
            Finding::SectionNotClosed(_) => "section-not-closed",
            Finding::MissingSection(_) => "missing-section",
            Finding::RepeatedSection(..) => "repeated-section",
            Finding::RuleOutsideSection => "rule-outside-section",
            Finding::InvalidEncoding => "invalid-encoding",
            Finding::NotNfkc => "not-nfkc",
            Finding::NotLowercase => "not-lowercase",
            Finding::WildcardAndException => "wildcard-and-exception",
            Finding::ExceptionWithoutWildcard => "exception-without-wildcard",
            Finding::EmptyLabel => "empty-label",
            Finding::Punycode => "punycode",
            Finding::DoubleMinus => "double-minus",
            Finding::IllegalCharacter => "illegal-character",
            Finding::Doublette { .. } => "doublette",
            Finding::InconsistentGroupTld => "group-tld",
            Finding::UnsortedGroup => "group-order",
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::LeadingTrailingWhitespace => f.write_str("Leading/Trailing whitespace"),
            Finding::UnknownSectionBegin => f.write_str("Unexpected begin of unknown section"),
            Finding::EndWithoutBegin => f.write_str("End of section without previous begin"),
            Finding::UnexpectedBegin => f.write_str("Unexpected begin of section"),
            Finding::UnexpectedEnd => f.write_str("Unexpected end of section"),
            Finding::SectionNotClosed(s) => write!(f, "{} section not closed", s),
            Finding::MissingSection(s) => write!(f, "No {} section found", s),
            Finding::RepeatedSection(s, n) => write!(f, "{} {} sections found", n, s),
            Finding::RuleOutsideSection => f.write_str("Rule outside of section"),
            Finding::InvalidEncoding => f.write_str("Invalid UTF-8 character"),
            Finding::NotNfkc => f.write_str("Rule must be NFKC"),
            Finding::NotLowercase => f.write_str("Rule must be lowercase"),
            Finding::WildcardAndException => f.write_str("Combination of wildcard and exception"),
            Finding::ExceptionWithoutWildcard => f.write_str("Exception without previous wildcard"),
            Finding::EmptyLabel => f.write_str("Leading/trailing or multiple dot"),
            Finding::Punycode => f.write_str("Punycode found"),
            Finding::DoubleMinus => f.write_str("Double minus found"),
            Finding::IllegalCharacter => f.write_str("Illegal character"),
            Finding::Doublette { previous_line } => write!(
                f,
                "Found doublette/ambiguity (previous line was {})",
                previous_line
            ),
            Finding::InconsistentGroupTld => f.write_str("Domain group TLD is not consistent"),
            Finding::UnsortedGroup => f.write_str("Incorrectly sorted group of domains"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_advisory_findings_are_warnings() {
        assert_eq!(Finding::LeadingTrailingWhitespace.severity(), Severity::Warning);
        assert_eq!(Finding::UnsortedGroup.severity(), Severity::Warning);
        assert_eq!(
            Finding::MissingSection(Section::Private).severity(),
            Severity::Warning
        );
        assert_eq!(Finding::NotLowercase.severity(), Severity::Error);
        assert_eq!(
            Finding::Doublette { previous_line: 3 }.severity(),
            Severity::Error
        );
        assert_eq!(
            Finding::SectionNotClosed(Section::Icann).severity(),
            Severity::Error
        );
    }

    #[test]
    fn test_messages_name_sections_and_counts() {
        assert_eq!(
            Finding::RepeatedSection(Section::Icann, 2).to_string(),
            "2 ICANN sections found"
        );
        assert_eq!(
            Finding::MissingSection(Section::Private).to_string(),
            "No PRIVATE section found"
        );
        assert_eq!(
            Finding::Doublette { previous_line: 7 }.to_string(),
            "Found doublette/ambiguity (previous line was 7)"
        );
    }
}
