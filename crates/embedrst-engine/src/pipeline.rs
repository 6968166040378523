use std::path::Path;

use relative_path::RelativePathBuf;

use crate::comments::{self, SourceComment};
use crate::diagnostics::Diagnostic;
use crate::extract::{self, RstPolicy};
use crate::io::{self, IoError};
use crate::lines::{LineRange, SourceLine};
use crate::rst::{self, NormalizedRstFragment};

/// Everything produced for one comment block: its normalized RST fragments
/// (possibly none) and the problems found along the way.
#[derive(Debug)]
pub struct CommentRst {
    /// Source range of the comment block.
    pub range: LineRange,
    /// The declaration following the block, passed through untouched.
    pub owner: Option<String>,
    pub fragments: Vec<NormalizedRstFragment>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Result of processing one file's worth of lines.
#[derive(Debug, Default)]
pub struct SourceRst {
    /// One entry per comment block, in source order.
    pub blocks: Vec<CommentRst>,
    /// Problems found outside any well-formed block (unterminated block
    /// comments).
    pub diagnostics: Vec<Diagnostic>,
}

impl SourceRst {
    /// All diagnostics, block-level and file-level, in source order.
    pub fn all_diagnostics(&self) -> Vec<&Diagnostic> {
        let mut all: Vec<&Diagnostic> = self
            .diagnostics
            .iter()
            .chain(self.blocks.iter().flat_map(|b| b.diagnostics.iter()))
            .collect();
        all.sort_by_key(|d| d.range);
        all
    }

    /// Total number of RST fragments across all blocks.
    pub fn fragment_count(&self) -> usize {
        self.blocks.iter().map(|b| b.fragments.len()).sum()
    }
}

/// Runs one comment block through stripping, extraction and normalization.
///
/// Pure per block: no state is shared between blocks, so callers are free to
/// fan out over blocks or files without coordination.
pub fn process_comment<P: RstPolicy>(comment: &SourceComment, policy: &P) -> CommentRst {
    let stripped = comments::strip(comment);
    let extraction = extract::extract(&stripped, policy);

    let mut fragments = vec![];
    let mut diagnostics = extraction.diagnostics;
    for fragment in extraction.fragments.iter().filter(|f| f.is_rst) {
        let (normalized, mut ambiguous) = rst::normalize_fragment(fragment);
        fragments.push(normalized);
        diagnostics.append(&mut ambiguous);
    }

    CommentRst {
        range: comment.range(),
        owner: comment.owner.clone(),
        fragments,
        diagnostics,
    }
}

/// Processes a full file's lines: scans comment blocks and runs each through
/// the pipeline. Fragments within a block, and blocks within the result, are
/// in source order.
pub fn process_lines<P: RstPolicy>(lines: &[SourceLine], policy: &P) -> SourceRst {
    let scan = comments::scan(lines);
    let blocks = scan
        .comments
        .iter()
        .map(|comment| process_comment(comment, policy))
        .collect();
    SourceRst {
        blocks,
        diagnostics: scan.diagnostics,
    }
}

/// Reads and processes one source file, attaching the file to every
/// diagnostic.
pub fn process_file<P: RstPolicy>(path: &Path, policy: &P) -> Result<SourceRst, IoError> {
    let lines = io::read_source_lines(path)?;
    let mut result = process_lines(&lines, policy);

    let file = RelativePathBuf::from(path.to_string_lossy().replace('\\', "/"));
    for diagnostic in result
        .diagnostics
        .iter_mut()
        .chain(result.blocks.iter_mut().flat_map(|b| b.diagnostics.iter_mut()))
    {
        diagnostic.file = Some(file.clone());
    }

    tracing::debug!(
        file = %path.display(),
        blocks = result.blocks.len(),
        fragments = result.fragment_count(),
        "processed source file"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticKind;
    use crate::extract::{DirectiveAutodetect, TriggerKind};
    use crate::lines::numbered_lines;
    use pretty_assertions::assert_eq;

    fn process(source: &str) -> SourceRst {
        process_lines(&numbered_lines(source), &DirectiveAutodetect)
    }

    #[test]
    fn verbatim_embed_rst_scenario() {
        let source = "\
/// \\verbatim embed:rst
/// .. tip::
///
///    text
/// \\endverbatim
void f();";
        let result = process(source);
        assert_eq!(result.blocks.len(), 1);
        let block = &result.blocks[0];
        assert_eq!(block.owner.as_deref(), Some("void f();"));
        assert_eq!(block.fragments.len(), 1);
        let fragment = &block.fragments[0];
        assert_eq!(fragment.trigger, TriggerKind::Verbatim);
        // The directive line is the minimum at zero indentation, so the tip
        // body keeps its three-space offset under the directive.
        assert_eq!(fragment.body(), ".. tip::\n\n   text");
        assert_eq!(fragment.range, LineRange::new(1, 5));
    }

    #[test]
    fn non_rst_fragments_are_not_handed_to_the_renderer() {
        let source = "\
/// ```{cpp}
/// int x = 0;
/// ```
int x;";
        let result = process(source);
        assert_eq!(result.blocks.len(), 1);
        assert!(result.blocks[0].fragments.is_empty());
        assert!(result.blocks[0].diagnostics.is_empty());
    }

    #[test]
    fn unterminated_block_comment_yields_no_fragments() {
        let source = "/** open forever\n * .. tip::";
        let result = process(source);
        assert!(result.blocks.is_empty());
        assert_eq!(result.fragment_count(), 0);
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].kind, DiagnosticKind::MalformedBlock);
        assert_eq!(result.diagnostics[0].range.start, 1);
    }

    #[test]
    fn fragment_ranges_are_monotonic_within_a_block() {
        let source = "\
/// ```{rst}
/// .. note:: one
/// ```
///
/// <pre> {rst}
/// .. note:: two
/// </pre>";
        let result = process(source);
        let block = &result.blocks[0];
        assert_eq!(block.fragments.len(), 2);
        let ranges: Vec<LineRange> = block.fragments.iter().map(|f| f.range).collect();
        let mut sorted = ranges.clone();
        sorted.sort();
        assert_eq!(ranges, sorted);
    }

    #[test]
    fn javadoc_star_block_end_to_end() {
        let source = "\
/**
 * \\verbatim embed:rst
 * .. admonition:: head
 *
 *    body
 * \\endverbatim
 */
void g();";
        let result = process(source);
        let block = &result.blocks[0];
        assert_eq!(block.fragments.len(), 1);
        assert_eq!(
            block.fragments[0].body(),
            ".. admonition:: head\n\n   body"
        );
    }

    #[test]
    fn ambiguous_inline_roles_surface_as_block_diagnostics() {
        let source = "\
/// ```{rst}
/// `:doc:'Broken <index>'`
/// ```";
        let result = process(source);
        let block = &result.blocks[0];
        assert_eq!(block.fragments.len(), 1);
        assert_eq!(block.diagnostics.len(), 1);
        assert_eq!(
            block.diagnostics[0].kind,
            DiagnosticKind::AmbiguousContainer
        );
        assert_eq!(block.diagnostics[0].range, LineRange::single(2));
    }

    #[test]
    fn sibling_blocks_survive_a_malformed_one() {
        let source = "\
/// ```{rst}
/// .. tip:: fine
/// ```
int ok;
/** never closed";
        let result = process(source);
        assert_eq!(result.blocks.len(), 1);
        assert_eq!(result.fragment_count(), 1);
        assert_eq!(result.diagnostics.len(), 1);
    }

    #[test]
    fn all_diagnostics_are_ordered_by_line() {
        let source = "\
/// ```{rst}
/// `:doc:'x'`
/// ```
int a;
/** open";
        let result = process(source);
        let all = result.all_diagnostics();
        assert_eq!(all.len(), 2);
        assert!(all[0].range.start <= all[1].range.start);
    }
}
