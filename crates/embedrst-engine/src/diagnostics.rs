use relative_path::RelativePathBuf;
use serde::Serialize;

use crate::lines::LineRange;

/// Classification of a non-fatal processing problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiagnosticKind {
    /// Unterminated block comment, or unterminated fragment trigger at the
    /// end of a comment.
    MalformedBlock,
    /// An inline role occurrence that cannot be safely rewritten and was
    /// passed through unmodified.
    AmbiguousContainer,
}

/// A non-fatal problem reported alongside the best-effort result.
///
/// Diagnostics never abort processing of sibling blocks or files; malformed
/// blocks are excluded from extraction, ambiguous inline containers are
/// passed through untouched.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// File the problem was found in. Block-level processing leaves this
    /// empty; the file-level API fills it in.
    pub file: Option<RelativePathBuf>,
    pub range: LineRange,
    pub message: String,
}

impl Diagnostic {
    pub fn malformed(range: LineRange, message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::MalformedBlock,
            file: None,
            range,
            message: message.into(),
        }
    }

    pub fn ambiguous(range: LineRange, message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::AmbiguousContainer,
            file: None,
            range,
            message: message.into(),
        }
    }

    pub fn with_file(mut self, file: RelativePathBuf) -> Self {
        self.file = Some(file);
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{}:{}: {}", file, self.range, self.message),
            None => write!(f, "{}: {}", self.range, self.message),
        }
    }
}
