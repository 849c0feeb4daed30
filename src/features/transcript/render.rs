//! Transcript rendering: message rows, the onboarding panel, and
//! conversion of styled lines to ratatui lines.

use ratatui::style::{Color, Modifier, Style as RatStyle};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use super::row::{RowParams, message_display_lines};
use super::state::TranscriptState;
use super::style::{Style, StyledLine, StyledSpan};
use crate::message::Role;

/// Columns taken by the role badge and its gap ("● ").
const BADGE_WIDTH: usize = 2;

/// Message bodies take at most this share of the row width, mirroring the
/// chat layout where bubbles never span the full pane.
const BODY_WIDTH_PERCENT: usize = 85;

/// Onboarding example prompts. Static affordances; any click-to-send
/// behavior belongs to the input box collaborator, not this renderer.
pub const EXAMPLE_PROMPTS: [&str; 4] = [
    "Create a modern product card with image, title, description, and button",
    "Build a contact form with name, email, and message fields",
    "Design a pricing table with three tiers",
    "Make a navigation bar with logo and menu items",
];

const ONBOARDING_TITLE: &str = "AI Component Generator";
const ONBOARDING_DESCRIPTION: &str =
    "Describe any component you need, and I'll create it for you with live preview.";
const ONBOARDING_PROMPT_LABEL: &str = "Try asking for:";

/// Horizontal row side, derived from the message role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAlignment {
    Left,
    Right,
}

/// One rendered message row: body lines plus its alignment side.
#[derive(Debug, Clone)]
pub struct Row {
    pub role: Role,
    pub lines: Vec<StyledLine>,
}

impl Row {
    /// Assistant rows sit on the left, user rows on the right.
    pub fn alignment(&self) -> RowAlignment {
        match self.role {
            Role::Assistant => RowAlignment::Left,
            Role::User => RowAlignment::Right,
        }
    }
}

/// Builds one row per message, in sequence order.
///
/// Row count always equals message count; a message with an empty body
/// still produces a row (with no lines).
pub fn build_rows(state: &TranscriptState, width: usize, spinner_frame: usize) -> Vec<Row> {
    let body_width = (width * BODY_WIDTH_PERCENT / 100)
        .saturating_sub(BADGE_WIDTH)
        .max(10);

    state
        .messages()
        .iter()
        .enumerate()
        .map(|(index, message)| {
            let params = RowParams {
                width: body_width,
                spinner_frame,
                show_generating: state.is_generating_slot(index),
            };
            Row {
                role: message.role,
                lines: message_display_lines(message, &params),
            }
        })
        .collect()
}

/// Renders the transcript pane into ratatui lines.
///
/// Empty thread: the onboarding panel. Otherwise one aligned row per
/// message with a blank line between rows.
pub fn render_transcript(
    state: &TranscriptState,
    width: usize,
    spinner_frame: usize,
) -> Vec<Line<'static>> {
    if state.is_empty() {
        return onboarding_lines(width)
            .into_iter()
            .map(convert_styled_line)
            .collect();
    }

    let mut lines = Vec::new();
    for (row_index, row) in build_rows(state, width, spinner_frame).iter().enumerate() {
        if row_index > 0 {
            lines.push(Line::default());
        }
        lines.extend(align_row(row, width).into_iter().map(convert_styled_line));
    }
    lines
}

/// Applies the badge and side alignment to a row's body lines.
///
/// Assistant: badge on the left of the first line, continuation lines
/// indented under it. User: lines right-aligned by left padding, badge on
/// the right of the first line.
fn align_row(row: &Row, width: usize) -> Vec<StyledLine> {
    let mut aligned = Vec::new();

    if row.lines.is_empty() {
        // Empty body still shows the role badge so the row is visible.
        aligned.push(badge_only_line(row.role, width));
        return aligned;
    }

    for (i, line) in row.lines.iter().enumerate() {
        let mut spans = Vec::new();
        match row.alignment() {
            RowAlignment::Left => {
                if i == 0 {
                    spans.push(StyledSpan::new("● ", Style::AssistantBadge));
                } else {
                    spans.push(StyledSpan::new(" ".repeat(BADGE_WIDTH), Style::Plain));
                }
                spans.extend(line.spans.iter().cloned());
            }
            RowAlignment::Right => {
                let line_width: usize = line.spans.iter().map(|s| s.text.width()).sum();
                let pad = width.saturating_sub(line_width + BADGE_WIDTH);
                if pad > 0 {
                    spans.push(StyledSpan::new(" ".repeat(pad), Style::Plain));
                }
                spans.extend(line.spans.iter().cloned());
                if i == 0 {
                    spans.push(StyledSpan::new(" ●", Style::UserBadge));
                } else {
                    spans.push(StyledSpan::new(" ".repeat(BADGE_WIDTH), Style::Plain));
                }
            }
        }
        aligned.push(StyledLine { spans });
    }

    aligned
}

fn badge_only_line(role: Role, width: usize) -> StyledLine {
    match role {
        Role::Assistant => StyledLine {
            spans: vec![StyledSpan::new("●", Style::AssistantBadge)],
        },
        Role::User => StyledLine {
            spans: vec![
                StyledSpan::new(" ".repeat(width.saturating_sub(1)), Style::Plain),
                StyledSpan::new("●", Style::UserBadge),
            ],
        },
    }
}

/// Builds the fixed onboarding panel shown for an empty thread.
pub fn onboarding_lines(width: usize) -> Vec<StyledLine> {
    let mut lines = vec![
        StyledLine {
            spans: vec![StyledSpan::new(ONBOARDING_TITLE, Style::OnboardingTitle)],
        },
        StyledLine::empty(),
    ];

    for wrapped in super::wrap::wrap_text(ONBOARDING_DESCRIPTION, width.max(20)) {
        lines.push(StyledLine {
            spans: vec![StyledSpan::new(wrapped, Style::OnboardingText)],
        });
    }
    lines.push(StyledLine::empty());
    lines.push(StyledLine {
        spans: vec![StyledSpan::new(ONBOARDING_PROMPT_LABEL, Style::OnboardingText)],
    });
    lines.push(StyledLine::empty());

    for prompt in EXAMPLE_PROMPTS {
        lines.push(StyledLine {
            spans: vec![
                StyledSpan::new("- ", Style::OnboardingText),
                StyledSpan::new(prompt, Style::OnboardingSuggestion),
            ],
        });
    }

    lines
}

/// Converts a transcript `StyledLine` to a ratatui `Line`.
pub fn convert_styled_line(styled_line: StyledLine) -> Line<'static> {
    let spans: Vec<Span<'static>> = styled_line
        .spans
        .into_iter()
        .map(|s| Span::styled(s.text, convert_style(s.style)))
        .collect();
    Line::from(spans)
}

/// Converts a semantic style to a ratatui style.
fn convert_style(style: Style) -> RatStyle {
    match style {
        Style::Plain => RatStyle::default(),
        Style::UserBadge => RatStyle::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::BOLD),
        Style::User => RatStyle::default().fg(Color::Blue),
        Style::AssistantBadge => RatStyle::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
        Style::Assistant => RatStyle::default().fg(Color::White),
        Style::ReasoningLabel => RatStyle::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::DIM),
        Style::Reasoning => RatStyle::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM | Modifier::ITALIC),
        Style::ToolBadge => RatStyle::default().fg(Color::Cyan),
        Style::ToolRunning => RatStyle::default().fg(Color::Cyan),
        Style::ToolDone => RatStyle::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        Style::SourceMeta => RatStyle::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM),
        Style::Separator => RatStyle::default().fg(Color::DarkGray),
        Style::Generating => RatStyle::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
        Style::OnboardingTitle => RatStyle::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
        Style::OnboardingText => RatStyle::default().fg(Color::Gray),
        Style::OnboardingSuggestion => RatStyle::default().fg(Color::Cyan),

        // Markdown styles
        Style::CodeInline => RatStyle::default()
            .fg(Color::Cyan)
            .bg(Color::DarkGray),
        Style::CodeBlock => RatStyle::default().fg(Color::Cyan),
        Style::CodeFence => RatStyle::default().fg(Color::DarkGray),
        Style::Emphasis => RatStyle::default().add_modifier(Modifier::ITALIC),
        Style::Strong => RatStyle::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        Style::ListBullet | Style::ListNumber => RatStyle::default().fg(Color::Yellow),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::message::{Message, Part, ToolInvocationState};

    fn thread(messages: Vec<Message>, is_loading: bool) -> TranscriptState {
        TranscriptState::new(messages, is_loading)
    }

    #[test]
    fn test_row_count_equals_message_count() {
        let state = thread(
            vec![
                Message::with_parts("u1", Role::User, vec![Part::text("one")]),
                Message::with_parts("a1", Role::Assistant, vec![Part::text("two")]),
                Message::pending("a2", Role::Assistant),
            ],
            false,
        );
        let rows = build_rows(&state, 80, 0);
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_row_alignment_matches_role() {
        let state = thread(
            vec![
                Message::with_parts("u1", Role::User, vec![Part::text("hi")]),
                Message::with_parts("a1", Role::Assistant, vec![Part::text("hello")]),
            ],
            false,
        );
        let rows = build_rows(&state, 80, 0);
        assert_eq!(rows[0].alignment(), RowAlignment::Right);
        assert_eq!(rows[1].alignment(), RowAlignment::Left);
    }

    #[test]
    fn test_user_row_right_aligned_with_badge() {
        let state = thread(
            vec![Message::with_parts("u1", Role::User, vec![Part::text("hi")])],
            false,
        );
        let rows = build_rows(&state, 40, 0);
        let aligned = align_row(&rows[0], 40);
        let text = aligned[0].text();
        assert!(text.starts_with(' '), "user line is left-padded: {text:?}");
        assert!(text.ends_with(" ●"));
    }

    #[test]
    fn test_assistant_row_left_aligned_with_badge() {
        let state = thread(
            vec![Message::with_parts(
                "a1",
                Role::Assistant,
                vec![Part::text("hello")],
            )],
            false,
        );
        let rows = build_rows(&state, 40, 0);
        let aligned = align_row(&rows[0], 40);
        assert!(aligned[0].text().starts_with("● "));
    }

    #[test]
    fn test_generating_indicator_only_on_last_assistant() {
        let state = thread(
            vec![
                Message::with_parts("a1", Role::Assistant, vec![Part::text("done")]),
                Message::with_parts("u1", Role::User, vec![Part::text("more")]),
                Message::pending("a2", Role::Assistant),
            ],
            true,
        );
        let rows = build_rows(&state, 80, 0);
        assert!(!rows[0].lines.iter().any(|l| l.text().contains("Generating")));
        assert!(!rows[1].lines.iter().any(|l| l.text().contains("Generating")));
        assert!(rows[2].lines.iter().any(|l| l.text().contains("Generating")));
    }

    #[test]
    fn test_no_generating_indicator_when_not_loading() {
        let state = thread(vec![Message::pending("a1", Role::Assistant)], false);
        let rows = build_rows(&state, 80, 0);
        assert!(rows[0].lines.is_empty());
    }

    #[test]
    fn test_last_user_message_never_gets_indicator() {
        let state = thread(
            vec![Message::with_parts(
                "u1",
                Role::User,
                vec![Part::text("hi")],
            )],
            true,
        );
        let rows = build_rows(&state, 80, 0);
        assert!(!rows[0].lines.iter().any(|l| l.text().contains("Generating")));
    }

    #[test]
    fn test_empty_thread_renders_onboarding_with_four_suggestions() {
        let state = thread(vec![], false);
        let lines = onboarding_lines(80);
        let suggestions = lines
            .iter()
            .filter(|l| {
                l.spans
                    .iter()
                    .any(|s| s.style == Style::OnboardingSuggestion)
            })
            .count();
        assert_eq!(suggestions, 4);

        // The full transcript render for an empty thread is the panel only.
        let rendered = render_transcript(&state, 80, 0);
        assert_eq!(rendered.len(), lines.len());
    }

    #[test]
    fn test_non_empty_thread_has_no_onboarding() {
        let state = thread(
            vec![Message::with_parts("u1", Role::User, vec![Part::text("hi")])],
            false,
        );
        let rendered = render_transcript(&state, 80, 0);
        let combined: String = rendered
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.clone()).collect::<String>())
            .collect();
        assert!(!combined.contains("Try asking for"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let state = thread(
            vec![
                Message::with_parts("u1", Role::User, vec![Part::text("hi")]),
                Message::with_parts(
                    "a1",
                    Role::Assistant,
                    vec![
                        Part::text("**bold** reply"),
                        Part::tool_invocation(
                            "generateComponent",
                            ToolInvocationState::Result,
                            Some(json!({"ok": true})),
                        ),
                    ],
                ),
            ],
            true,
        );
        let first = render_transcript(&state, 72, 3);
        let second = render_transcript(&state, 72, 3);
        assert_eq!(first, second);
    }
}
