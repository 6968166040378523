use serde::Serialize;

/// A single source line with its absolute position in the originating file.
///
/// The upstream producer hands the engine `(line number, text)` pairs; every
/// downstream artifact keeps these numbers so diagnostics and cross-references
/// can map back to the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// 1-based line number in the originating file.
    pub number: u32,
    /// Line text without the trailing newline.
    pub text: String,
}

impl SourceLine {
    pub fn new(number: u32, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }

    /// Whether the line is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// An inclusive range of 1-based source line numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct LineRange {
    pub start: u32,
    pub end: u32,
}

impl LineRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Range covering a single line.
    pub fn single(line: u32) -> Self {
        Self {
            start: line,
            end: line,
        }
    }

    /// Smallest range covering `lines`, or `None` for an empty slice.
    pub fn of(lines: &[SourceLine]) -> Option<Self> {
        match (lines.first(), lines.last()) {
            (Some(first), Some(last)) => Some(Self {
                start: first.number,
                end: last.number,
            }),
            _ => None,
        }
    }
}

impl std::fmt::Display for LineRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Splits raw file content into numbered lines.
///
/// Numbering starts at 1 to match editor and compiler conventions.
pub fn numbered_lines(content: &str) -> Vec<SourceLine> {
    content
        .lines()
        .enumerate()
        .map(|(i, text)| SourceLine::new(i as u32 + 1, text))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbering_starts_at_one() {
        let lines = numbered_lines("first\nsecond\nthird");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], SourceLine::new(1, "first"));
        assert_eq!(lines[2], SourceLine::new(3, "third"));
    }

    #[test]
    fn trailing_newline_adds_no_line() {
        let lines = numbered_lines("only\n");
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn range_of_lines() {
        let lines = numbered_lines("a\nb\nc");
        assert_eq!(LineRange::of(&lines), Some(LineRange::new(1, 3)));
        assert_eq!(LineRange::of(&[]), None);
    }

    #[test]
    fn range_display() {
        assert_eq!(LineRange::new(4, 4).to_string(), "4");
        assert_eq!(LineRange::new(4, 9).to_string(), "4-9");
    }

    #[test]
    fn blank_detection() {
        assert!(SourceLine::new(1, "").is_blank());
        assert!(SourceLine::new(1, "   \t").is_blank());
        assert!(!SourceLine::new(1, " x").is_blank());
    }
}
