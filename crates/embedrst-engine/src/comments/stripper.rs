use crate::lines::SourceLine;

use super::style::CommentStyle;
use super::types::{SourceComment, StrippedComment};

/// Removes per-line comment decoration from a scanned comment.
///
/// Line count and numbering are preserved 1:1 so downstream diagnostics can
/// map back to the source; lines without content become empty strings.
pub fn strip(comment: &SourceComment) -> StrippedComment {
    let lines = match comment.style {
        CommentStyle::TripleSlash => {
            strip_line_style(&comment.lines, CommentStyle::TRIPLE_SLASH)
        }
        CommentStyle::BangSlash => strip_line_style(&comment.lines, CommentStyle::BANG_SLASH),
        CommentStyle::Javadoc => strip_block_style(&comment.lines, CommentStyle::JAVADOC_OPEN),
        CommentStyle::Qt => strip_block_style(&comment.lines, CommentStyle::QT_OPEN),
    };
    StrippedComment {
        style: comment.style,
        lines,
    }
}

/// Strips the fixed prefix and exactly one following space if present.
/// Whitespace beyond that single space is content indentation and stays.
fn strip_line_style(lines: &[SourceLine], prefix: &str) -> Vec<SourceLine> {
    lines
        .iter()
        .map(|line| {
            let t = line.text.trim_start();
            let content = match t.strip_prefix(prefix) {
                Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
                // Scanner output always carries the prefix; anything else is
                // passed through untouched.
                None => t,
            };
            SourceLine::new(line.number, blank_to_empty(content))
        })
        .collect()
}

/// Strips the opening/closing tokens, plus aligned `*` decoration when every
/// non-blank line after the opener carries it.
fn strip_block_style(lines: &[SourceLine], open_token: &str) -> Vec<SourceLine> {
    let mut contents: Vec<String> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let mut text: &str = &line.text;
            if i == 0 {
                let t = text.trim_start();
                text = t.strip_prefix(open_token).unwrap_or(t);
                text = text.strip_prefix(' ').unwrap_or(text);
            }
            let cut = match text.find(CommentStyle::BLOCK_CLOSE) {
                Some(idx) => text[..idx].trim_end(),
                None => text,
            };
            cut.to_string()
        })
        .collect();

    // The aligned `*` is decoration only when every non-blank line after the
    // opener carries it; a single line without it means none are decoration.
    let starred = contents
        .iter()
        .skip(1)
        .all(|c| c.trim().is_empty() || c.trim_start().starts_with('*'));

    if starred {
        for content in contents.iter_mut().skip(1) {
            let t = content.trim_start();
            if let Some(rest) = t.strip_prefix('*') {
                *content = rest.strip_prefix(' ').unwrap_or(rest).to_string();
            }
        }
    }

    lines
        .iter()
        .zip(contents)
        .map(|(line, content)| SourceLine::new(line.number, blank_to_empty(&content)))
        .collect()
}

/// Lines without content become empty strings, never whitespace runs.
fn blank_to_empty(content: &str) -> &str {
    if content.trim().is_empty() { "" } else { content }
}
