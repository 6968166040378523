use crate::lines::{LineRange, SourceLine};

use super::style::CommentStyle;

/// A contiguous run of comment lines in one comment style.
///
/// Produced by the scanner, consumed exactly once by the stripper. Lines are
/// the raw source lines, decoration still in place.
#[derive(Debug, Clone)]
pub struct SourceComment {
    pub style: CommentStyle,
    pub lines: Vec<SourceLine>,
    /// Trimmed first code line following the block, if any. Opaque to the
    /// engine; passed through for consumers that map comments to the
    /// declarations they document.
    pub owner: Option<String>,
}

impl SourceComment {
    /// Source range covered by the comment. Scanned comments always contain
    /// at least one line.
    pub fn range(&self) -> LineRange {
        LineRange::of(&self.lines).unwrap_or(LineRange::single(0))
    }
}

/// A comment with per-line decoration removed.
///
/// Line count and numbering map 1:1 to the originating [`SourceComment`];
/// blank lines are empty strings, never dropped. Content indentation is
/// preserved relative to the block's own minimal common indentation.
#[derive(Debug, Clone)]
pub struct StrippedComment {
    pub style: CommentStyle,
    pub lines: Vec<SourceLine>,
}

impl StrippedComment {
    pub fn range(&self) -> LineRange {
        LineRange::of(&self.lines).unwrap_or(LineRange::single(0))
    }
}
