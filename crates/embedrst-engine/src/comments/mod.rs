//! Comment block scanning and decoration stripping.
//!
//! Phase 1 of the pipeline: raw source lines are grouped into
//! [`SourceComment`]s, one per maximal same-style run, and each comment is
//! stripped to a [`StrippedComment`] whose lines map 1:1 back to the source.

pub mod scanner;
pub mod stripper;
pub mod style;
pub mod types;

pub use scanner::{CommentScanner, Scan, scan};
pub use stripper::strip;
pub use style::CommentStyle;
pub use types::{SourceComment, StrippedComment};
