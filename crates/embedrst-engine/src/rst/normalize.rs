use std::sync::OnceLock;

use regex::Regex;

use crate::extract::{Qualifier, RstFragment};
use crate::lines::SourceLine;

use super::types::NormalizedRstFragment;

/// Removes qualifier-declared decoration and the uniform base indentation.
///
/// Relative nesting is preserved: a body indented two levels deeper than its
/// directive line keeps that offset. Re-normalizing an already-normalized
/// fragment is a no-op.
pub fn normalize(fragment: &RstFragment) -> NormalizedRstFragment {
    let mut lines = fragment.lines.clone();
    if let Some(qualifier) = fragment.qualifier {
        strip_residual_prefixes(&mut lines, qualifier);
    }
    dedent(&mut lines);
    NormalizedRstFragment {
        trigger: fragment.trigger,
        lines,
        range: fragment.range,
    }
}

/// Breathe's `embed:rst:leading-*` markers declare that body lines still
/// carry comment decoration the stripper could not remove (misaligned stars,
/// doxygen-flattened content). Without a qualifier nothing is removed here: a
/// bare `*` may open RST emphasis.
fn strip_residual_prefixes(lines: &mut [SourceLine], qualifier: Qualifier) {
    let pattern = match qualifier {
        Qualifier::LeadingAsterisk => {
            static ASTERISK: OnceLock<Regex> = OnceLock::new();
            ASTERISK.get_or_init(|| Regex::new(r"^\s*\*").expect("Invalid asterisk regex"))
        }
        Qualifier::LeadingSlashes => {
            static SLASHES: OnceLock<Regex> = OnceLock::new();
            SLASHES.get_or_init(|| Regex::new(r"^\s*(?:///|//!)").expect("Invalid slashes regex"))
        }
    };
    for line in lines.iter_mut() {
        if let std::borrow::Cow::Owned(replaced) = pattern.replace(&line.text, "") {
            line.text = replaced;
        }
    }
}

/// Removes the minimum leading-whitespace width (in characters) across all
/// non-blank lines from every non-blank line; blank lines stay empty.
fn dedent(lines: &mut [SourceLine]) {
    let min = lines
        .iter()
        .filter(|l| !l.is_blank())
        .map(|l| indent_width(&l.text))
        .min()
        .unwrap_or(0);
    for line in lines.iter_mut() {
        if line.is_blank() {
            line.text.clear();
        } else if min > 0 {
            line.text = line.text.chars().skip(min).collect();
        }
    }
}

fn indent_width(text: &str) -> usize {
    text.chars().take_while(|c| c.is_whitespace()).count()
}
