/// The comment style a scanned block was written in.
///
/// The two line styles are semantically identical and kept distinct only so
/// the stripper removes the exact prefix that was present. The two block
/// styles share all rules apart from their opening token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// `///` line comments.
    TripleSlash,
    /// `//!` line comments.
    BangSlash,
    /// `/** ... */` block comments.
    Javadoc,
    /// `/*! ... */` block comments.
    Qt,
}

impl CommentStyle {
    pub const TRIPLE_SLASH: &'static str = "///";
    pub const BANG_SLASH: &'static str = "//!";
    pub const JAVADOC_OPEN: &'static str = "/**";
    pub const QT_OPEN: &'static str = "/*!";
    pub const BLOCK_CLOSE: &'static str = "*/";

    /// Detects a comment opening at the start of `line` (leading whitespace
    /// ignored) and returns the style together with the text following the
    /// opening token. Block openers are checked before anything treats the
    /// line as a plain `/*` comment.
    pub fn open(line: &str) -> Option<(CommentStyle, &str)> {
        let t = line.trim_start();
        if let Some(rest) = t.strip_prefix(Self::JAVADOC_OPEN) {
            Some((CommentStyle::Javadoc, rest))
        } else if let Some(rest) = t.strip_prefix(Self::QT_OPEN) {
            Some((CommentStyle::Qt, rest))
        } else if let Some(rest) = t.strip_prefix(Self::TRIPLE_SLASH) {
            Some((CommentStyle::TripleSlash, rest))
        } else if let Some(rest) = t.strip_prefix(Self::BANG_SLASH) {
            Some((CommentStyle::BangSlash, rest))
        } else {
            None
        }
    }

    /// The fixed per-line prefix for line styles, `None` for block styles.
    pub fn line_prefix(self) -> Option<&'static str> {
        match self {
            CommentStyle::TripleSlash => Some(Self::TRIPLE_SLASH),
            CommentStyle::BangSlash => Some(Self::BANG_SLASH),
            CommentStyle::Javadoc | CommentStyle::Qt => None,
        }
    }

    pub fn is_block(self) -> bool {
        matches!(self, CommentStyle::Javadoc | CommentStyle::Qt)
    }

    /// Whether `line` continues a run of this line style.
    pub fn continues(self, line: &str) -> bool {
        match self.line_prefix() {
            Some(prefix) => line.trim_start().starts_with(prefix),
            None => false,
        }
    }
}
