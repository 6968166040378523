pub mod comments;
pub mod diagnostics;
pub mod extract;
pub mod io;
pub mod lines;
pub mod pipeline;
pub mod rst;
pub mod snapshot;

// Re-export key types for easier usage
pub use comments::{CommentStyle, SourceComment, StrippedComment};
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use extract::{DirectiveAutodetect, Qualifier, RstFragment, RstPolicy, TriggerKind};
pub use lines::{LineRange, SourceLine, numbered_lines};
pub use pipeline::{CommentRst, SourceRst, process_comment, process_file, process_lines};
pub use rst::{NormalizedRstFragment, normalize_fragment};
