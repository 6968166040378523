//! Fragment normalization: indentation canonicalization and inline role
//! rewriting.

pub mod inline;
pub mod normalize;
pub mod types;

pub use inline::{RewrittenLine, rewrite_line};
pub use types::{Container, InlineRoleOccurrence, NormalizedRstFragment, Quoting};

use crate::diagnostics::Diagnostic;
use crate::extract::RstFragment;
use crate::lines::LineRange;

/// Normalizes a fragment and rewrites its inline roles, reporting the
/// occurrences that had to be passed through unchanged.
pub fn normalize_fragment(fragment: &RstFragment) -> (NormalizedRstFragment, Vec<Diagnostic>) {
    let mut normalized = normalize::normalize(fragment);
    let mut diagnostics = vec![];
    for line in normalized.lines.iter_mut() {
        let rewritten = rewrite_line(&line.text);
        line.text = rewritten.text;
        for occurrence in rewritten.ambiguous {
            diagnostics.push(Diagnostic::ambiguous(
                LineRange::single(line.number),
                format!(
                    "inline role :{}: with {} quoting in a {} cannot be rewritten; passed through unchanged",
                    occurrence.role,
                    occurrence.quoting.label(),
                    occurrence.container.label(),
                ),
            ));
        }
    }
    (normalized, diagnostics)
}
