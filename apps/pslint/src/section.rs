//! Section state machine driven by `// ===BEGIN ...===` / `// ===END ...===`
//! marker comments.

use crate::models::{Finding, Section};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Begin(Section),
    End(Section),
    UnknownBegin,
    UnknownEnd,
}

impl Marker {
    fn parse(text: &str) -> Option<Marker> {
        for s in [Section::Icann, Section::Private] {
            if s.begin_marker() == Some(text) {
                return Some(Marker::Begin(s));
            }
            if s.end_marker() == Some(text) {
                return Some(Marker::End(s));
            }
        }
        let rest = text.get(3..)?;
        if rest.starts_with("===BEGIN") {
            Some(Marker::UnknownBegin)
        } else if rest.starts_with("===END") {
            Some(Marker::UnknownEnd)
        } else {
            None
        }
    }
}

#[derive(Debug, Default)]
pub struct SectionTracker {
    current: Section,
    icann_sections: usize,
    private_sections: usize,
}

impl SectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Section {
        self.current
    }

    pub fn count(&self, section: Section) -> usize {
        match section {
            Section::Icann => self.icann_sections,
            Section::Private => self.private_sections,
            Section::Outside => 0,
        }
    }

    /// Apply a comment line. Plain comments leave the state untouched.
    pub fn on_comment(&mut self, text: &str) -> Option<Finding> {
        let marker = Marker::parse(text)?;
        match (self.current, marker) {
            (Section::Outside, Marker::Begin(s)) => {
                self.enter(s);
                None
            }
            (Section::Outside, Marker::UnknownBegin) => Some(Finding::UnknownSectionBegin),
            (Section::Outside, Marker::End(_) | Marker::UnknownEnd) => {
                Some(Finding::EndWithoutBegin)
            }
            (cur, Marker::End(s)) if cur == s => {
                tracing::trace!(section = %s, "section closed");
                self.current = Section::Outside;
                None
            }
            // Nested begin: report it, then the newer section wins.
            (_, Marker::Begin(s)) => {
                self.enter(s);
                Some(Finding::UnexpectedBegin)
            }
            (_, Marker::UnknownBegin) => Some(Finding::UnexpectedBegin),
            (_, Marker::End(_) | Marker::UnknownEnd) => Some(Finding::UnexpectedEnd),
        }
    }

    fn enter(&mut self, section: Section) {
        tracing::trace!(section = %section, "section opened");
        self.current = section;
        match section {
            Section::Icann => self.icann_sections += 1,
            Section::Private => self.private_sections += 1,
            Section::Outside => {}
        }
    }

    /// End-of-input findings: an open section, then missing or repeated
    /// sections.
    pub fn finish(&self) -> Vec<Finding> {
        let mut out = Vec::new();
        if self.current != Section::Outside {
            out.push(Finding::SectionNotClosed(self.current));
        }
        for s in [Section::Icann, Section::Private] {
            match self.count(s) {
                0 => out.push(Finding::MissingSection(s)),
                1 => {}
                n => out.push(Finding::RepeatedSection(s, n)),
            }
        }
        out
    }
}
