//! Line normalization for registry input.
//!
//! Input is read as raw bytes split on `\n` so malformed UTF-8 becomes a
//! finding on the affected line rather than an I/O failure.

use std::io::{self, BufRead};

#[derive(Debug, Clone, PartialEq, Eq)]
/// One input line, ready for section and rule processing.
pub struct SourceLine {
    /// 1-based line number.
    pub number: usize,
    /// Untrimmed line used for diagnostic echo; tabs and carriage returns
    /// are made visible when the line carries outer whitespace.
    pub original: String,
    /// Trimmed working text.
    pub text: String,
    pub valid_utf8: bool,
    pub outer_whitespace: bool,
}

impl SourceLine {
    pub fn from_bytes(number: usize, raw: &[u8]) -> Self {
        let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
        let (decoded, valid_utf8) = match std::str::from_utf8(raw) {
            Ok(s) => (s.to_string(), true),
            Err(_) => (String::from_utf8_lossy(raw).into_owned(), false),
        };
        let text = decoded.trim().to_string();
        let outer_whitespace = text.len() != decoded.len();
        let original = if outer_whitespace {
            decoded.replace('\t', "\\t").replace('\r', "^M")
        } else {
            decoded
        };
        Self {
            number,
            original,
            text,
            valid_utf8,
            outer_whitespace,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_comment(&self) -> bool {
        self.text.starts_with("//")
    }
}

/// Iterate over normalized lines of `reader`. A read error ends the
/// iteration with that error.
pub fn read_lines<R: BufRead>(reader: R) -> impl Iterator<Item = io::Result<SourceLine>> {
    reader
        .split(b'\n')
        .enumerate()
        .map(|(idx, chunk)| chunk.map(|raw| SourceLine::from_bytes(idx + 1, &raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_line_is_kept_verbatim() {
        let l = SourceLine::from_bytes(1, b"example.com");
        assert_eq!(l.text, "example.com");
        assert_eq!(l.original, "example.com");
        assert!(l.valid_utf8);
        assert!(!l.outer_whitespace);
    }

    #[test]
    fn test_outer_whitespace_is_flagged_and_made_visible() {
        let l = SourceLine::from_bytes(4, b"\texample.com \r");
        assert_eq!(l.number, 4);
        assert_eq!(l.text, "example.com");
        assert!(l.outer_whitespace);
        assert_eq!(l.original, "\\texample.com ^M");
    }

    #[test]
    fn test_invalid_utf8_is_decoded_lossily() {
        let l = SourceLine::from_bytes(2, b"ex\xffample.com");
        assert!(!l.valid_utf8);
        assert!(l.text.starts_with("ex"));
        assert!(l.text.ends_with("ample.com"));
    }

    #[test]
    fn test_read_lines_numbers_from_one() {
        let input: &[u8] = b"// c\n\nfoo.bar\n";
        let lines: Vec<SourceLine> = read_lines(input).collect::<io::Result<_>>().unwrap();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].is_comment());
        assert!(lines[1].is_blank());
        assert_eq!(lines[2].number, 3);
        assert_eq!(lines[2].text, "foo.bar");
    }
}
