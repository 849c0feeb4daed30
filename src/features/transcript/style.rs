/// A styled span of text (UI-agnostic).
///
/// This is a minimal representation that can be converted to
/// ratatui Span/Line types at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    pub text: String,
    pub style: Style,
}

impl StyledSpan {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        StyledSpan {
            text: text.into(),
            style,
        }
    }
}

/// A line of styled spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledLine {
    pub spans: Vec<StyledSpan>,
}

impl StyledLine {
    /// Creates an empty line.
    pub fn empty() -> Self {
        StyledLine { spans: vec![] }
    }

    /// Concatenated plain text of all spans.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Semantic style identifiers (UI-agnostic).
///
/// These are translated to actual terminal styles by the renderer.
/// This keeps the transcript module free of terminal dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// No styling.
    Plain,
    /// Role icon badge next to a user row.
    UserBadge,
    /// User message content (rendered literally, no markdown).
    User,
    /// Role icon badge next to an assistant row.
    AssistantBadge,
    /// Assistant message body text.
    Assistant,
    /// "Reasoning" label above a reasoning block.
    ReasoningLabel,
    /// Reasoning block content (dim).
    Reasoning,
    /// Tool badge name text.
    ToolBadge,
    /// Tool running spinner glyph.
    ToolRunning,
    /// Tool completed dot glyph.
    ToolDone,
    /// Source citation metadata line.
    SourceMeta,
    /// Step boundary separator rule.
    Separator,
    /// "Generating…" indicator while the latest response streams in.
    Generating,
    /// Onboarding panel title.
    OnboardingTitle,
    /// Onboarding panel description and section label.
    OnboardingText,
    /// Onboarding example prompt suggestion.
    OnboardingSuggestion,

    // Markdown styles
    /// Inline code (`code`) - compact pill styling.
    CodeInline,
    /// Fenced code block content.
    CodeBlock,
    /// Code fence markers; keeps the language tag for downstream highlighting.
    CodeFence,
    /// Emphasized text (*italic*).
    Emphasis,
    /// Strong text (**bold**) - foreground distinct from body text.
    Strong,
    /// List bullet marker.
    ListBullet,
    /// List number marker.
    ListNumber,
}
