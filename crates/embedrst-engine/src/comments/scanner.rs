use crate::diagnostics::Diagnostic;
use crate::lines::{LineRange, SourceLine};

use super::style::CommentStyle;
use super::types::SourceComment;

/// Result of scanning one file's lines for comment blocks.
#[derive(Debug, Default)]
pub struct Scan {
    pub comments: Vec<SourceComment>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Groups raw source lines into comment blocks.
///
/// Feed lines in file order via [`CommentScanner::push`], then call
/// [`CommentScanner::finish`]. A block is a maximal run of consecutive
/// same-style line comments, or a `/** ... */` / `/*! ... */` region. Blocks
/// of different styles never merge, even without a separating blank line.
pub struct CommentScanner {
    state: State,
    /// Indices into `out` of comments still waiting for their owner line.
    pending_owner: Vec<usize>,
    out: Vec<SourceComment>,
    diagnostics: Vec<Diagnostic>,
}

enum State {
    Idle,
    /// Accumulating a maximal run of one line style.
    LineRun {
        style: CommentStyle,
        lines: Vec<SourceLine>,
    },
    /// Inside a doc block comment, waiting for `*/`.
    Block {
        style: CommentStyle,
        lines: Vec<SourceLine>,
    },
    /// Inside a plain `/* ... */` comment. Skipped entirely, but consumed so
    /// its interior lines are not mistaken for code.
    PlainBlock,
}

impl CommentScanner {
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            pending_owner: vec![],
            out: vec![],
            diagnostics: vec![],
        }
    }

    pub fn push(&mut self, line: &SourceLine) {
        match std::mem::replace(&mut self.state, State::Idle) {
            State::Idle => self.dispatch(line),
            State::LineRun { style, mut lines } => {
                if style.continues(&line.text) {
                    lines.push(line.clone());
                    self.state = State::LineRun { style, lines };
                } else {
                    self.close_comment(style, lines);
                    self.dispatch(line);
                }
            }
            State::Block { style, mut lines } => {
                lines.push(line.clone());
                if line.text.contains(CommentStyle::BLOCK_CLOSE) {
                    self.close_comment(style, lines);
                } else {
                    self.state = State::Block { style, lines };
                }
            }
            State::PlainBlock => {
                if !line.text.contains(CommentStyle::BLOCK_CLOSE) {
                    self.state = State::PlainBlock;
                }
            }
        }
    }

    /// Terminates scanning. A still-open line run is closed normally (end of
    /// input terminates it like any non-matching line); a still-open block
    /// comment is malformed and reported instead of emitted.
    pub fn finish(mut self) -> Scan {
        match std::mem::replace(&mut self.state, State::Idle) {
            State::LineRun { style, lines } => self.close_comment(style, lines),
            State::Block { lines, .. } => {
                let range = LineRange::of(&lines).unwrap_or(LineRange::single(0));
                self.diagnostics
                    .push(Diagnostic::malformed(range, "unterminated block comment"));
            }
            State::Idle | State::PlainBlock => {}
        }
        Scan {
            comments: self.out,
            diagnostics: self.diagnostics,
        }
    }

    /// Handles a line while no comment is open.
    fn dispatch(&mut self, line: &SourceLine) {
        if let Some((style, rest)) = CommentStyle::open(&line.text) {
            if !style.is_block() {
                self.state = State::LineRun {
                    style,
                    lines: vec![line.clone()],
                };
            } else if rest.contains(CommentStyle::BLOCK_CLOSE) {
                // Opening and closing token on one line.
                self.close_comment(style, vec![line.clone()]);
            } else {
                self.state = State::Block {
                    style,
                    lines: vec![line.clone()],
                };
            }
            return;
        }

        let t = line.text.trim_start();
        if let Some(after) = t.strip_prefix("/*") {
            if !after.contains(CommentStyle::BLOCK_CLOSE) {
                self.state = State::PlainBlock;
            }
            return;
        }

        if !t.is_empty() && !t.starts_with("//") {
            // First code line after one or more comment blocks: it owns them.
            let owner = line.text.trim().to_string();
            for idx in self.pending_owner.drain(..) {
                self.out[idx].owner = Some(owner.clone());
            }
        }
    }

    fn close_comment(&mut self, style: CommentStyle, lines: Vec<SourceLine>) {
        self.pending_owner.push(self.out.len());
        self.out.push(SourceComment {
            style,
            lines,
            owner: None,
        });
    }
}

impl Default for CommentScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Scans a slice of lines in one go.
pub fn scan(lines: &[SourceLine]) -> Scan {
    let mut scanner = CommentScanner::new();
    for line in lines {
        scanner.push(line);
    }
    scanner.finish()
}
