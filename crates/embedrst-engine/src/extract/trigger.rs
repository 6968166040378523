use super::types::{Qualifier, TriggerKind};

/// How a fragment start line tagged the region it opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    /// No tag; the first body line or the autodetection policy decides.
    None,
    /// `{rst}` or an `embed:rst[:...]` marker: the region is RST.
    Rst(Option<Qualifier>),
    /// `{cpp}`, ```` ```plain ````, ...: explicitly not RST.
    Language(String),
    /// `embed:rst:inline`: recognized but unsupported for block regions. The
    /// region is not RST and autodetection is skipped.
    Unsupported,
}

/// A recognized fragment start line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opening {
    pub trigger: TriggerKind,
    pub tag: Tag,
}

pub const MD_FENCE: &str = "```";
pub const TILDE_FENCE_MIN: usize = 4;
pub const PRE_OPEN: &str = "<pre>";
pub const PRE_CLOSE: &str = "</pre>";
pub const EMBED_RST: &str = "embed:rst";
pub const EMBED_RST_ASTERISK: &str = "embed:rst:leading-asterisk";
pub const EMBED_RST_SLASHES: &str = "embed:rst:leading-slashes";
pub const EMBED_RST_INLINE: &str = "embed:rst:inline";

/// Tries to recognize a fragment start on `line` (whitespace-trimmed).
pub fn try_open(line: &str) -> Option<Opening> {
    if let Some(rest) = line.strip_prefix(MD_FENCE) {
        return Some(Opening {
            trigger: TriggerKind::MarkdownFence,
            tag: fence_tag(rest),
        });
    }
    let tildes = line.chars().take_while(|&c| c == '~').count();
    if tildes >= TILDE_FENCE_MIN {
        return Some(Opening {
            trigger: TriggerKind::SpecialFence,
            tag: fence_tag(&line[tildes..]),
        });
    }
    if let Some(rest) = command(line, "verbatim") {
        return Some(Opening {
            trigger: TriggerKind::Verbatim,
            tag: marker_tag(rest),
        });
    }
    if let Some(rest) = command(line, "code") {
        return Some(Opening {
            trigger: TriggerKind::Code,
            tag: marker_tag(rest),
        });
    }
    if let Some(rest) = line.strip_prefix(PRE_OPEN) {
        return Some(Opening {
            trigger: TriggerKind::PreTag,
            tag: fence_tag(rest),
        });
    }
    None
}

/// Whether `line` (whitespace-trimmed) closes an open fragment of `trigger`
/// kind. End tokens must stand alone on their line.
pub fn closes(trigger: TriggerKind, line: &str) -> bool {
    match trigger {
        TriggerKind::MarkdownFence => line == MD_FENCE,
        // The closing run's length need not match the opening run.
        TriggerKind::SpecialFence => {
            line.len() >= TILDE_FENCE_MIN && line.chars().all(|c| c == '~')
        }
        // Either command prefix closes either opener.
        TriggerKind::Verbatim => line == "\\endverbatim" || line == "@endverbatim",
        TriggerKind::Code => line == "\\endcode" || line == "@endcode",
        TriggerKind::PreTag => line == PRE_CLOSE,
    }
}

/// Recognizes a marker standing alone on the first body line of an untagged
/// fragment: `{rst}`, `{lang}`, or the `embed:rst[:...]` family. A line with
/// trailing text after a brace marker is content, not a marker.
pub fn body_marker(line: &str) -> Option<Tag> {
    if line.starts_with('{') {
        return brace_tag(line);
    }
    if line.starts_with(EMBED_RST) {
        return Some(embed_tag(line));
    }
    None
}

/// Tag grammar after fence and `<pre>` start tokens: an optional `{name}` or
/// a bare language word.
fn fence_tag(rest: &str) -> Tag {
    let rest = rest.trim();
    if rest.is_empty() {
        return Tag::None;
    }
    if rest.starts_with('{') {
        return brace_tag(rest).unwrap_or(Tag::None);
    }
    if rest.chars().all(is_language_char) {
        return named_tag(rest);
    }
    Tag::None
}

/// Tag grammar after `\verbatim` / `\code`: an optional `{name}` or one of
/// the breathe `embed:rst` markers.
fn marker_tag(rest: &str) -> Tag {
    let rest = rest.trim();
    if rest.is_empty() {
        return Tag::None;
    }
    if rest.starts_with('{') {
        return brace_tag(rest).unwrap_or(Tag::None);
    }
    if rest.starts_with(EMBED_RST) {
        return embed_tag(rest);
    }
    Tag::None
}

/// Matches `\name` or `@name` followed by end of line, whitespace, or a
/// directly attached `{...}` (doxygen's `\code{.py}`), returning the rest.
fn command<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    let rest = line
        .strip_prefix('\\')
        .or_else(|| line.strip_prefix('@'))?
        .strip_prefix(name)?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) || rest.starts_with('{') {
        Some(rest.trim_start())
    } else {
        None
    }
}

/// Parses an exact `{name}` marker. Doxygen's `\code{.py}` dot prefix is
/// tolerated.
fn brace_tag(text: &str) -> Option<Tag> {
    let inner = text.strip_prefix('{')?.strip_suffix('}')?;
    let name = inner.trim_start_matches('.');
    if !name.is_empty() && name.chars().all(is_language_char) {
        Some(named_tag(name))
    } else {
        None
    }
}

fn named_tag(name: &str) -> Tag {
    if name == "rst" {
        Tag::Rst(None)
    } else {
        Tag::Language(name.to_string())
    }
}

/// The breathe marker family. Unknown `embed:rst:<x>` suffixes degrade to the
/// plain marker, matching the original prefix-based recognition.
fn embed_tag(text: &str) -> Tag {
    match text {
        EMBED_RST => Tag::Rst(None),
        EMBED_RST_ASTERISK => Tag::Rst(Some(Qualifier::LeadingAsterisk)),
        EMBED_RST_SLASHES => Tag::Rst(Some(Qualifier::LeadingSlashes)),
        EMBED_RST_INLINE => Tag::Unsupported,
        _ => Tag::Rst(None),
    }
}

fn is_language_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '+' | '-' | '_')
}
