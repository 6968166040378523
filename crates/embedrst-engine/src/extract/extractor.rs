use crate::comments::StrippedComment;
use crate::diagnostics::Diagnostic;
use crate::lines::{LineRange, SourceLine};

use super::autodetect::RstPolicy;
use super::trigger::{self, Tag};
use super::types::{RstFragment, TriggerKind};

/// Fragments sliced out of one stripped comment, with the problems found on
/// the way.
#[derive(Debug, Default)]
pub struct Extraction {
    pub fragments: Vec<RstFragment>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Lazy fragment sequence over a stripped comment's lines.
///
/// Fragments are yielded in source order; a consumer may stop early. Start
/// tokens inside an open fragment are plain content: triggers never nest
/// with themselves, and only the open trigger's own end token closes.
pub struct Fragments<'a, P: RstPolicy> {
    lines: &'a [SourceLine],
    policy: &'a P,
    pos: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<'a, P: RstPolicy> Fragments<'a, P> {
    pub fn new(comment: &'a StrippedComment, policy: &'a P) -> Self {
        Self {
            lines: &comment.lines,
            policy,
            pos: 0,
            diagnostics: vec![],
        }
    }

    /// Diagnostics collected so far; complete once the iterator is exhausted.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

impl<P: RstPolicy> Iterator for Fragments<'_, P> {
    type Item = RstFragment;

    fn next(&mut self) -> Option<RstFragment> {
        let lines = self.lines;
        while self.pos < lines.len() {
            let start = self.pos;
            let Some(opening) = trigger::try_open(lines[start].text.trim()) else {
                self.pos += 1;
                continue;
            };

            let close = (start + 1..lines.len())
                .find(|&j| trigger::closes(opening.trigger, lines[j].text.trim()));
            let Some(end) = close else {
                let range = LineRange::new(
                    lines[start].number,
                    lines.last().map(|l| l.number).unwrap_or(lines[start].number),
                );
                self.diagnostics.push(Diagnostic::malformed(
                    range,
                    format!("unterminated {} fragment", describe(opening.trigger)),
                ));
                self.pos = lines.len();
                return None;
            };
            self.pos = end + 1;

            let mut body = &lines[start + 1..end];
            let mut tag = opening.tag;
            if tag == Tag::None {
                // An untagged opener may carry its marker alone on the first
                // non-blank body line; the marker line and anything above it
                // is consumed.
                if let Some((idx, marker)) = first_body_marker(body) {
                    tag = marker;
                    body = &body[idx + 1..];
                }
            }

            let range = LineRange::new(lines[start].number, lines[end].number);
            let fragment = match tag {
                Tag::Rst(qualifier) => RstFragment {
                    trigger: opening.trigger,
                    qualifier,
                    language: Some("rst".to_string()),
                    lines: body.to_vec(),
                    range,
                    is_rst: true,
                },
                Tag::Language(language) => RstFragment {
                    trigger: opening.trigger,
                    qualifier: None,
                    language: Some(language),
                    lines: body.to_vec(),
                    range,
                    is_rst: false,
                },
                // Recognized but unsupported marker: not RST, and the
                // autodetection policy is not consulted.
                Tag::Unsupported => RstFragment {
                    trigger: opening.trigger,
                    qualifier: None,
                    language: None,
                    lines: body.to_vec(),
                    range,
                    is_rst: false,
                },
                Tag::None => RstFragment {
                    trigger: opening.trigger,
                    qualifier: None,
                    language: None,
                    is_rst: self.policy.is_rst(body),
                    lines: body.to_vec(),
                    range,
                },
            };
            return Some(fragment);
        }
        None
    }
}

/// Extracts all fragments from a stripped comment in one go.
pub fn extract<P: RstPolicy>(comment: &StrippedComment, policy: &P) -> Extraction {
    let mut iter = Fragments::new(comment, policy);
    let fragments: Vec<RstFragment> = iter.by_ref().collect();
    let diagnostics = iter.take_diagnostics();
    tracing::trace!(
        range = %comment.range(),
        fragments = fragments.len(),
        "extracted fragments from comment"
    );
    Extraction {
        fragments,
        diagnostics,
    }
}

fn first_body_marker(body: &[SourceLine]) -> Option<(usize, Tag)> {
    let (idx, first) = body.iter().enumerate().find(|(_, l)| !l.is_blank())?;
    trigger::body_marker(first.text.trim()).map(|tag| (idx, tag))
}

fn describe(trigger: TriggerKind) -> &'static str {
    match trigger {
        TriggerKind::MarkdownFence => "markdown fence",
        TriggerKind::SpecialFence => "tilde fence",
        TriggerKind::Verbatim => "\\verbatim",
        TriggerKind::Code => "\\code",
        TriggerKind::PreTag => "<pre>",
    }
}
