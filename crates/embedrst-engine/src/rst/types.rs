use crate::extract::TriggerKind;
use crate::lines::{LineRange, SourceLine};

/// A fragment ready for the downstream renderer: uniform base indentation
/// removed, inline pseudo-roles rewritten, source range preserved.
#[derive(Debug, Clone)]
pub struct NormalizedRstFragment {
    pub trigger: TriggerKind,
    /// Body lines; numbering still maps back to the source.
    pub lines: Vec<SourceLine>,
    /// Source range of the originating fragment, delimiters included.
    pub range: LineRange,
}

impl NormalizedRstFragment {
    /// The fragment body as one newline-joined string.
    pub fn body(&self) -> String {
        let mut out = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&line.text);
        }
        out
    }
}

/// Where an inline role occurrence was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    /// `<code>...</code>`
    HtmlCode,
    /// `<tt>...</tt>`
    HtmlTt,
    /// `` `...` ``
    MarkdownBacktick,
}

impl Container {
    pub fn label(self) -> &'static str {
        match self {
            Container::HtmlCode => "<code> element",
            Container::HtmlTt => "<tt> element",
            Container::MarkdownBacktick => "markdown span",
        }
    }
}

/// How the role target was quoted inside its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quoting {
    /// `"target"`
    DoubleQuote,
    /// `'target'`
    SingleQuote,
    /// `` \`target\` ``
    EscapedBacktick,
}

impl Quoting {
    pub fn label(self) -> &'static str {
        match self {
            Quoting::DoubleQuote => "double-quote",
            Quoting::SingleQuote => "single-quote",
            Quoting::EscapedBacktick => "escaped-backtick",
        }
    }
}

/// One inline pseudo-role found by the rewriter. Ephemeral: produced and
/// consumed within the rewriting pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineRoleOccurrence {
    pub container: Container,
    pub quoting: Quoting,
    pub role: String,
    pub target: String,
}
