use std::sync::OnceLock;

use regex::Regex;

use crate::lines::SourceLine;

/// Decides whether an untagged fragment body is RST.
///
/// Kept behind a trait so the heuristic can be swapped or tuned without
/// touching extraction or normalization.
pub trait RstPolicy {
    fn is_rst(&self, body: &[SourceLine]) -> bool;
}

/// Default policy: a fragment is RST iff at least one non-blank body line,
/// after leading whitespace, starts with an RST directive (`.. name::`).
/// Trailing text on the directive line is allowed. Deterministic, no scoring:
/// a single match anywhere in the body suffices.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectiveAutodetect;

fn directive_pattern() -> &'static Regex {
    static DIRECTIVE: OnceLock<Regex> = OnceLock::new();
    // Two periods, one space, one or more non-whitespace chars, two colons.
    DIRECTIVE.get_or_init(|| Regex::new(r"^\.\. \S+::").expect("Invalid directive regex"))
}

impl RstPolicy for DirectiveAutodetect {
    fn is_rst(&self, body: &[SourceLine]) -> bool {
        body.iter()
            .any(|line| directive_pattern().is_match(line.text.trim_start()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn body(text: &str) -> Vec<SourceLine> {
        text.lines()
            .enumerate()
            .map(|(i, l)| SourceLine::new(i as u32 + 1, l))
            .collect()
    }

    #[rstest]
    #[case(".. tip::\n\n   text")]
    #[case(".. need:: test\n   :status: open")]
    #[case(".. directive:: with a title")]
    #[case("   .. admonition:: indented directive")]
    #[case("prose first\n.. tip::\nprose last")]
    fn detects_directives(#[case] text: &str) {
        assert!(DirectiveAutodetect.is_rst(&body(text)));
    }

    #[rstest]
    #[case("FIRST_LINE\nSECOND_LINE")]
    #[case("..directive::no space between dots and name")]
    #[case(".. no-colons")]
    #[case(".. ::")]
    #[case("")]
    #[case("// .. tip:: behind a comment prefix")]
    fn rejects_non_directives(#[case] text: &str) {
        assert!(!DirectiveAutodetect.is_rst(&body(text)));
    }
}
