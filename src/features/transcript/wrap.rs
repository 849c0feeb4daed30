use unicode_width::UnicodeWidthStr;

use super::style::{Style, StyledLine, StyledSpan};

/// Renders content with a prefix, handling line wrapping.
///
/// The prefix appears on the first line; subsequent wrapped lines are
/// indented to align with the content start. Blank lines in the content are
/// preserved (user text keeps its whitespace and newlines verbatim at the
/// paragraph level).
pub(crate) fn render_prefixed_content(
    prefix: &str,
    content: &str,
    width: usize,
    prefix_style: Style,
    content_style: Style,
) -> Vec<StyledLine> {
    let mut lines = Vec::new();
    let prefix_display_width = prefix.width();

    // Minimum usable width
    let min_width = prefix_display_width + 10;
    let effective_width = width.max(min_width);
    let content_width = effective_width.saturating_sub(prefix_display_width);

    for paragraph in content.split('\n') {
        if paragraph.is_empty() {
            let line_prefix = if lines.is_empty() {
                StyledSpan::new(prefix, prefix_style)
            } else {
                StyledSpan::new(" ".repeat(prefix_display_width), Style::Plain)
            };
            lines.push(StyledLine {
                spans: vec![line_prefix],
            });
            continue;
        }

        for wrapped_line in wrap_text(paragraph, content_width) {
            let mut spans = Vec::new();

            if lines.is_empty() {
                spans.push(StyledSpan::new(prefix, prefix_style));
            } else {
                spans.push(StyledSpan::new(
                    " ".repeat(prefix_display_width),
                    Style::Plain,
                ));
            }

            spans.push(StyledSpan::new(wrapped_line, content_style));
            lines.push(StyledLine { spans });
        }
    }

    // Handle empty content
    if lines.is_empty() {
        lines.push(StyledLine {
            spans: vec![StyledSpan::new(prefix, prefix_style)],
        });
    }

    lines
}

/// Wraps text to fit within the given display width.
///
/// Uses unicode display width for proper handling of CJK characters,
/// emoji, and zero-width characters. Does not hyphenate.
pub(crate) fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_width: usize = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();

        if current_line.is_empty() {
            if word_width > width {
                // Word is too long, force break by character
                let mut broken = wrap_chars(word, width);
                if let Some(last) = broken.pop() {
                    lines.extend(broken);
                    current_width = last.width();
                    current_line = last;
                }
            } else {
                current_line = word.to_string();
                current_width = word_width;
            }
        } else if current_width + 1 + word_width <= width {
            current_line.push(' ');
            current_line.push_str(word);
            current_width += 1 + word_width;
        } else {
            lines.push(std::mem::take(&mut current_line));
            if word_width > width {
                let mut broken = wrap_chars(word, width);
                if let Some(last) = broken.pop() {
                    lines.extend(broken);
                    current_width = last.width();
                    current_line = last;
                }
            } else {
                current_line = word.to_string();
                current_width = word_width;
            }
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

/// Breaks a string into parts that fit within the given display width.
///
/// Used for hard wrapping (code, long words) where exact width matters more
/// than word boundaries. Breaks at character boundaries, respecting display
/// width; zero-width characters stay with the preceding fragment.
pub(crate) fn wrap_chars(text: &str, width: usize) -> Vec<String> {
    use unicode_width::UnicodeWidthChar;

    let mut parts = Vec::new();
    let mut current = String::new();
    let mut current_width: usize = 0;

    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);

        if ch_width == 0 {
            current.push(ch);
            continue;
        }

        if current_width + ch_width > width && !current.is_empty() {
            parts.push(current);
            current = String::new();
            current_width = 0;
        }

        current.push(ch);
        current_width += ch_width;
    }

    if !current.is_empty() {
        parts.push(current);
    }

    if parts.is_empty() {
        parts.push(String::new());
    }

    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_basic() {
        let wrapped = wrap_text("hello world", 20);
        assert_eq!(wrapped, vec!["hello world"]);
    }

    #[test]
    fn test_wrap_text_split() {
        let wrapped = wrap_text("hello world", 8);
        assert_eq!(wrapped, vec!["hello", "world"]);
    }

    #[test]
    fn test_wrap_text_long_word() {
        let wrapped = wrap_text("supercalifragilistic", 10);
        assert_eq!(wrapped, vec!["supercalif", "ragilistic"]);
    }

    #[test]
    fn test_wrap_text_cjk_double_width() {
        // "你好世界" = 4 characters, 8 display columns
        let wrapped = wrap_text("你好世界", 6);
        assert_eq!(wrapped, vec!["你好世", "界"]);
    }

    #[test]
    fn test_wrap_chars_cjk() {
        let parts = wrap_chars("你好世界很长", 4);
        assert_eq!(parts, vec!["你好", "世界", "很长"]);
    }

    #[test]
    fn test_prefixed_content_first_line_prefix_only() {
        let lines = render_prefixed_content("│ ", "one\ntwo", 40, Style::Plain, Style::User);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans[0].text, "│ ");
        assert_eq!(lines[1].spans[0].text, "  ");
    }

    #[test]
    fn test_prefixed_content_preserves_blank_lines() {
        let lines = render_prefixed_content("│ ", "a\n\nb", 40, Style::Plain, Style::User);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].spans.len(), 1);
    }
}
