use crate::lines::{LineRange, SourceLine};

/// The five trigger syntaxes that can delimit an embedded-RST region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKind {
    /// ```` ``` ```` fenced block.
    MarkdownFence,
    /// Fenced block delimited by runs of four or more tildes.
    SpecialFence,
    /// `\verbatim` / `@verbatim` command.
    Verbatim,
    /// `\code` / `@code` command.
    Code,
    /// `<pre>` html element.
    PreTag,
}

/// Breathe-compatible `embed:rst:*` qualifiers.
///
/// A qualifier signals that the body lines still carry comment decoration the
/// normalizer has to remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Qualifier {
    /// `embed:rst:leading-asterisk`: body lines carry `*` decoration.
    LeadingAsterisk,
    /// `embed:rst:leading-slashes`: body lines carry `///` decoration.
    LeadingSlashes,
}

/// An embedded region sliced out of a stripped comment.
///
/// Immutable once produced; normalization creates a new value instead of
/// mutating this one.
#[derive(Debug, Clone)]
pub struct RstFragment {
    pub trigger: TriggerKind,
    pub qualifier: Option<Qualifier>,
    /// Explicit language tag: `"rst"` for `{rst}`/`embed:rst` forms, the
    /// named language for `{cpp}`-style tags, `None` when untagged.
    pub language: Option<String>,
    /// Body lines between the delimiters, marker lines removed.
    pub lines: Vec<SourceLine>,
    /// Source range including the delimiter lines.
    pub range: LineRange,
    /// Whether the fragment is RST, resolved by explicit tag or by the
    /// autodetection policy.
    pub is_rst: bool,
}
