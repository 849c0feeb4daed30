//! Per-message rendering: dispatches each typed part to its visual block.

use serde_json::Value;
use unicode_width::UnicodeWidthStr;

use super::style::{Style, StyledLine, StyledSpan};
use super::wrap::{render_prefixed_content, wrap_chars};
use crate::common::truncate_with_ellipsis;
use crate::markdown::render_markdown;
use crate::message::{Message, Part, Role, ToolInvocation};

/// Spinner frames for the tool-running and generating indicators.
/// Circle characters render more reliably than braille across terminals.
pub const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Static dot shown on a completed tool badge.
const DONE_DOT: &str = "●";

/// Max width of a step separator rule.
const SEPARATOR_MAX_WIDTH: usize = 40;

/// Inputs for rendering one message row body.
#[derive(Debug, Clone, Copy)]
pub struct RowParams {
    /// Available content width in terminal columns.
    pub width: usize,
    /// Current spinner animation frame counter.
    pub spinner_frame: usize,
    /// True when this message is the last assistant message and a
    /// generation is in flight; appends the generating indicator.
    pub show_generating: bool,
}

/// Renders a message body into display lines for the given width.
///
/// Dispatch rules per part variant:
/// - `text`: user text is literal (whitespace preserved, no markdown);
///   assistant text goes through the markdown renderer
/// - `reasoning`: labeled nested block
/// - `tool-invocation`: compact badge, spinner while running, dot when done
/// - `source`: one truncated metadata line
/// - `step-start`: separator rule, suppressed at part index 0
/// - unknown variants: nothing
///
/// A message with no `parts` falls back to `content` under the same text
/// rule; the content fallback never carries the generating indicator.
/// With neither, the body is empty unless the indicator applies.
pub fn message_display_lines(message: &Message, params: &RowParams) -> Vec<StyledLine> {
    let mut lines = Vec::new();

    if let Some(parts) = &message.parts {
        for (index, part) in parts.iter().enumerate() {
            part_display_lines(part, index, message.role, params, &mut lines);
        }
        if params.show_generating {
            lines.push(generating_line(params.spinner_frame));
        }
    } else if let Some(content) = &message.content {
        lines.extend(text_display_lines(content, message.role, params.width));
    } else if params.show_generating {
        lines.push(generating_line(params.spinner_frame));
    }

    lines
}

fn part_display_lines(
    part: &Part,
    index: usize,
    role: Role,
    params: &RowParams,
    lines: &mut Vec<StyledLine>,
) {
    match part {
        Part::Text { text } => {
            lines.extend(text_display_lines(text, role, params.width));
        }
        Part::Reasoning { reasoning } => {
            lines.push(StyledLine {
                spans: vec![StyledSpan::new("Reasoning", Style::ReasoningLabel)],
            });
            lines.extend(render_prefixed_content(
                "│ ",
                reasoning,
                params.width,
                Style::ReasoningLabel,
                Style::Reasoning,
            ));
        }
        Part::ToolInvocation { tool_invocation } => {
            lines.push(tool_badge_line(
                tool_invocation,
                params.width,
                params.spinner_frame,
            ));
        }
        Part::Source { source } => {
            lines.push(source_line(source, params.width));
        }
        Part::StepStart => {
            // A leading separator would have nothing above it.
            if index > 0 {
                lines.push(StyledLine {
                    spans: vec![StyledSpan::new(
                        "─".repeat(params.width.min(SEPARATOR_MAX_WIDTH)),
                        Style::Separator,
                    )],
                });
            }
        }
        Part::Unknown => {}
    }
}

/// Renders message text under the role rule.
///
/// User input is preformatted: newlines and internal whitespace survive
/// verbatim, and nothing is interpreted as markup. Assistant text is
/// markdown.
fn text_display_lines(text: &str, role: Role, width: usize) -> Vec<StyledLine> {
    match role {
        Role::User => {
            let mut lines = Vec::new();
            for raw_line in text.split('\n') {
                for wrapped in wrap_chars(raw_line, width.max(1)) {
                    lines.push(StyledLine {
                        spans: vec![StyledSpan::new(wrapped, Style::User)],
                    });
                }
            }
            lines
        }
        Role::Assistant => render_markdown(text, width),
    }
}

/// Builds the compact tool badge line.
fn tool_badge_line(tool: &ToolInvocation, width: usize, spinner_frame: usize) -> StyledLine {
    let (glyph, glyph_style) = if tool.is_completed() {
        (DONE_DOT.to_string(), Style::ToolDone)
    } else {
        let frame = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
        (frame.to_string(), Style::ToolRunning)
    };

    let name_width = width.saturating_sub(glyph.width() + 1).max(4);
    StyledLine {
        spans: vec![
            StyledSpan::new(glyph, glyph_style),
            StyledSpan::new(" ", Style::Plain),
            StyledSpan::new(
                truncate_with_ellipsis(&tool.tool_name, name_width),
                Style::ToolBadge,
            ),
        ],
    }
}

/// Renders a source citation as one metadata line.
///
/// Compact JSON keeps the serialization stable for a given value.
fn source_line(source: &Value, width: usize) -> StyledLine {
    let serialized = serde_json::to_string(source).unwrap_or_else(|_| source.to_string());
    let text = format!("Source: {serialized}");
    StyledLine {
        spans: vec![StyledSpan::new(
            truncate_with_ellipsis(&text, width.max(12)),
            Style::SourceMeta,
        )],
    }
}

fn generating_line(spinner_frame: usize) -> StyledLine {
    let frame = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
    StyledLine {
        spans: vec![
            StyledSpan::new(frame, Style::Generating),
            StyledSpan::new(" Generating…", Style::Generating),
        ],
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::message::ToolInvocationState;

    fn params() -> RowParams {
        RowParams {
            width: 60,
            spinner_frame: 0,
            show_generating: false,
        }
    }

    fn flat_text(lines: &[StyledLine]) -> String {
        lines
            .iter()
            .map(StyledLine::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_user_text_is_literal() {
        let msg = Message::with_parts("m1", Role::User, vec![Part::text("**hi**")]);
        let lines = message_display_lines(&msg, &params());

        // Markdown syntax stays literal for user input.
        assert_eq!(flat_text(&lines), "**hi**");
        assert!(lines[0].spans.iter().all(|s| s.style == Style::User));
    }

    #[test]
    fn test_user_text_preserves_whitespace() {
        let msg = Message::with_parts("m1", Role::User, vec![Part::text("a  b\n  indented")]);
        let lines = message_display_lines(&msg, &params());
        assert_eq!(flat_text(&lines), "a  b\n  indented");
    }

    #[test]
    fn test_assistant_text_renders_markdown() {
        let msg = Message::with_parts("m1", Role::Assistant, vec![Part::text("**hi**")]);
        let lines = message_display_lines(&msg, &params());

        let combined = flat_text(&lines);
        assert!(!combined.contains("**"), "asterisks should be consumed");
        let has_strong = lines
            .iter()
            .any(|l| l.spans.iter().any(|s| s.style == Style::Strong && s.text == "hi"));
        assert!(has_strong, "bold text should carry the Strong style");
    }

    #[test]
    fn test_tool_badge_completed_shows_dot() {
        let msg = Message::with_parts(
            "m1",
            Role::Assistant,
            vec![Part::tool_invocation(
                "generateComponent",
                ToolInvocationState::Result,
                Some(json!({"code": "<div />"})),
            )],
        );
        let lines = message_display_lines(&msg, &params());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].spans[0].text, "●");
        assert_eq!(lines[0].spans[0].style, Style::ToolDone);
        assert!(lines[0].text().contains("generateComponent"));
    }

    #[test]
    fn test_tool_badge_result_state_without_payload_spins() {
        let msg = Message::with_parts(
            "m1",
            Role::Assistant,
            vec![Part::tool_invocation(
                "generateComponent",
                ToolInvocationState::Result,
                None,
            )],
        );
        let lines = message_display_lines(&msg, &params());
        assert_eq!(lines[0].spans[0].style, Style::ToolRunning);
        assert_eq!(lines[0].spans[0].text, SPINNER_FRAMES[0]);
    }

    #[test]
    fn test_tool_badge_pending_spins() {
        let msg = Message::with_parts(
            "m1",
            Role::Assistant,
            vec![Part::tool_invocation(
                "generateComponent",
                ToolInvocationState::Pending,
                None,
            )],
        );
        let lines = message_display_lines(&msg, &params());
        assert_eq!(lines[0].spans[0].style, Style::ToolRunning);
    }

    #[test]
    fn test_step_start_suppressed_at_index_zero() {
        let msg = Message::with_parts(
            "m1",
            Role::Assistant,
            vec![Part::StepStart, Part::text("after")],
        );
        let lines = message_display_lines(&msg, &params());
        assert!(
            !lines.iter().any(|l| l.spans.iter().any(|s| s.style == Style::Separator)),
            "no separator for a step boundary at index 0"
        );
    }

    #[test]
    fn test_step_start_renders_separator_after_first() {
        let msg = Message::with_parts(
            "m1",
            Role::Assistant,
            vec![Part::text("before"), Part::StepStart, Part::text("after")],
        );
        let lines = message_display_lines(&msg, &params());
        let separators = lines
            .iter()
            .filter(|l| l.spans.iter().any(|s| s.style == Style::Separator))
            .count();
        assert_eq!(separators, 1);
    }

    #[test]
    fn test_unknown_part_renders_nothing() {
        let msg = Message::with_parts("m1", Role::Assistant, vec![Part::Unknown]);
        let lines = message_display_lines(&msg, &params());
        assert!(lines.is_empty());
    }

    #[test]
    fn test_reasoning_block_labeled() {
        let msg = Message::with_parts(
            "m1",
            Role::Assistant,
            vec![Part::reasoning("thinking it through")],
        );
        let lines = message_display_lines(&msg, &params());
        assert_eq!(lines[0].text(), "Reasoning");
        assert!(flat_text(&lines).contains("thinking it through"));
    }

    #[test]
    fn test_source_line_serialized() {
        let msg = Message::with_parts(
            "m1",
            Role::Assistant,
            vec![Part::Source {
                source: json!({"url": "https://example.com"}),
            }],
        );
        let lines = message_display_lines(&msg, &params());
        assert!(lines[0].text().starts_with("Source: "));
        assert!(lines[0].text().contains("example.com"));
    }

    #[test]
    fn test_content_fallback_used_without_parts() {
        let msg = Message::with_content("m1", Role::User, "legacy body");
        let lines = message_display_lines(&msg, &params());
        assert_eq!(flat_text(&lines), "legacy body");
    }

    #[test]
    fn test_parts_take_precedence_over_content() {
        let mut msg = Message::with_parts("m1", Role::User, vec![Part::text("from parts")]);
        msg.content = Some("from content".to_string());
        let lines = message_display_lines(&msg, &params());
        assert_eq!(flat_text(&lines), "from parts");
    }

    #[test]
    fn test_empty_pending_message_with_generating_indicator() {
        let msg = Message::pending("m1", Role::Assistant);
        let p = RowParams {
            show_generating: true,
            ..params()
        };
        let lines = message_display_lines(&msg, &p);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].text().contains("Generating"));
    }

    #[test]
    fn test_empty_pending_message_without_loading_renders_nothing() {
        let msg = Message::pending("m1", Role::Assistant);
        let lines = message_display_lines(&msg, &params());
        assert!(lines.is_empty());
    }

    #[test]
    fn test_content_fallback_never_gets_generating_indicator() {
        let msg = Message::with_content("m1", Role::Assistant, "legacy body");
        let p = RowParams {
            show_generating: true,
            ..params()
        };
        let lines = message_display_lines(&msg, &p);
        assert_eq!(flat_text(&lines), "legacy body");
        assert!(!lines.iter().any(|l| l.text().contains("Generating")));
    }

    #[test]
    fn test_generating_indicator_appends_after_parts() {
        let msg = Message::with_parts("m1", Role::Assistant, vec![Part::text("partial")]);
        let p = RowParams {
            show_generating: true,
            ..params()
        };
        let lines = message_display_lines(&msg, &p);
        let last = lines.last().unwrap();
        assert!(last.text().contains("Generating"));
        assert!(last.spans.iter().all(|s| s.style == Style::Generating));
    }
}
