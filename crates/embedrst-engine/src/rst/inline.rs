use std::sync::OnceLock;

use regex::{Captures, Regex};

use super::types::{Container, InlineRoleOccurrence, Quoting};

/// Result of rewriting one line of text.
#[derive(Debug, Clone)]
pub struct RewrittenLine {
    pub text: String,
    /// Occurrences that cannot be rewritten safely and were left byte-equal.
    pub ambiguous: Vec<InlineRoleOccurrence>,
}

/// Rewrites inline pseudo-roles into valid RST role syntax.
///
/// Three containers (`<code>`, `<tt>`, markdown backtick span) times three
/// quotings (double quote, single quote, escaped backtick). Seven of the nine
/// combinations become `` :role:`target` `` with the container dropped. The
/// two markdown combinations with single quotes or escaped backticks are
/// mangled upstream before this stage ever runs, so they are reported and
/// passed through unchanged rather than guessed at.
pub fn rewrite_line(text: &str) -> RewrittenLine {
    let mut ambiguous = vec![];
    let text = rewrite_html_container(text, html_code_pattern(), Container::HtmlCode);
    let text = rewrite_html_container(&text, html_tt_pattern(), Container::HtmlTt);
    let text = rewrite_markdown_spans(&text, &mut ambiguous);
    RewrittenLine { text, ambiguous }
}

fn html_code_pattern() -> &'static Regex {
    static CODE: OnceLock<Regex> = OnceLock::new();
    CODE.get_or_init(|| Regex::new(r"<code>(.*?)</code>").expect("Invalid code-tag regex"))
}

fn html_tt_pattern() -> &'static Regex {
    static TT: OnceLock<Regex> = OnceLock::new();
    TT.get_or_init(|| Regex::new(r"<tt>(.*?)</tt>").expect("Invalid tt-tag regex"))
}

fn markdown_span_pattern() -> &'static Regex {
    static SPAN: OnceLock<Regex> = OnceLock::new();
    // Escaped backticks may appear inside the span.
    SPAN.get_or_init(|| Regex::new(r"`((?:\\`|[^`])*)`").expect("Invalid span regex"))
}

/// All three quotings are rewritable inside html containers.
fn rewrite_html_container(text: &str, pattern: &Regex, _container: Container) -> String {
    pattern
        .replace_all(text, |caps: &Captures| match parse_role(&caps[1]) {
            Some((role, _, target)) => render_role(&role, &target),
            None => caps[0].to_string(),
        })
        .into_owned()
}

fn rewrite_markdown_spans(text: &str, ambiguous: &mut Vec<InlineRoleOccurrence>) -> String {
    markdown_span_pattern()
        .replace_all(text, |caps: &Captures| match parse_role(&caps[1]) {
            Some((role, Quoting::DoubleQuote, target)) => render_role(&role, &target),
            Some((role, quoting, target)) => {
                ambiguous.push(InlineRoleOccurrence {
                    container: Container::MarkdownBacktick,
                    quoting,
                    role,
                    target,
                });
                caps[0].to_string()
            }
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Parses a container payload of the form `:role[:subrole...]:<quoted target>`.
fn parse_role(payload: &str) -> Option<(String, Quoting, String)> {
    static ROLE: OnceLock<Regex> = OnceLock::new();
    let pattern = ROLE.get_or_init(|| {
        Regex::new(r"^:((?:[A-Za-z0-9_.+-]+:)+)(.+)$").expect("Invalid role regex")
    });
    let caps = pattern.captures(payload)?;
    let role = caps[1].trim_end_matches(':').to_string();
    let (quoting, target) = quoted_target(caps.get(2).map(|m| m.as_str()).unwrap_or(""))?;
    Some((role, quoting, target.to_string()))
}

fn quoted_target(rest: &str) -> Option<(Quoting, &str)> {
    if rest.len() >= 2 && rest.starts_with('"') && rest.ends_with('"') {
        return Some((Quoting::DoubleQuote, &rest[1..rest.len() - 1]));
    }
    if rest.len() >= 2 && rest.starts_with('\'') && rest.ends_with('\'') {
        return Some((Quoting::SingleQuote, &rest[1..rest.len() - 1]));
    }
    if rest.len() >= 4 && rest.starts_with("\\`") && rest.ends_with("\\`") {
        return Some((Quoting::EscapedBacktick, &rest[2..rest.len() - 2]));
    }
    None
}

/// Authors escape angle brackets as entities to survive the html containers;
/// the rewritten role carries the literal text.
fn render_role(role: &str, target: &str) -> String {
    let decoded = html_escape::decode_html_entities(target);
    format!(":{role}:`{decoded}`")
}
