use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use unicode_width::UnicodeWidthStr;

use super::wrap::{WrapOptions, wrap_styled_spans};
use crate::features::transcript::style::{Style, StyledLine, StyledSpan};

/// Renders assistant markdown into styled lines.
///
/// Only the constructs the chat view styles specially get dedicated
/// treatment: inline code, fenced code blocks (language kept on the
/// fence), lists with a blank line between items, paragraphs separated
/// by a blank line, and strong text in a distinct foreground. Everything
/// else renders as body text.
pub fn render_markdown(text: &str, width: usize) -> Vec<StyledLine> {
    if text.is_empty() {
        return vec![StyledLine::empty()];
    }

    let parser = Parser::new_ext(text, Options::empty());
    let mut renderer = MarkdownRenderer::new(width);

    for event in parser {
        renderer.process_event(event);
    }

    renderer.finish()
}

struct MarkdownRenderer {
    width: usize,
    lines: Vec<StyledLine>,
    /// Spans collected for the block currently being built.
    current_spans: Vec<StyledSpan>,
    /// Style stack for nested inline markup.
    style_stack: Vec<Style>,
    in_code_block: bool,
    /// Language tag of the current fenced block, if any.
    code_block_lang: Option<String>,
    list_stack: Vec<ListState>,
}

#[derive(Debug, Clone)]
struct ListState {
    /// None for unordered, Some(n) for ordered starting at n.
    ordered: Option<u64>,
    current_item: u64,
    items_emitted: u64,
}

impl MarkdownRenderer {
    fn new(width: usize) -> Self {
        Self {
            width,
            lines: Vec::new(),
            current_spans: Vec::new(),
            style_stack: vec![Style::Assistant],
            in_code_block: false,
            code_block_lang: None,
            list_stack: Vec::new(),
        }
    }

    fn current_style(&self) -> Style {
        self.style_stack.last().copied().unwrap_or(Style::Assistant)
    }

    fn push_style(&mut self, style: Style) {
        self.style_stack.push(style);
    }

    fn pop_style(&mut self) {
        if self.style_stack.len() > 1 {
            self.style_stack.pop();
        }
    }

    fn process_event(&mut self, event: Event) {
        match event {
            Event::Start(tag) => self.start_tag(&tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => {
                if !text.is_empty() {
                    self.current_spans
                        .push(StyledSpan::new(text.to_string(), self.current_style()));
                }
            }
            Event::Code(code) => {
                self.current_spans
                    .push(StyledSpan::new(code.to_string(), Style::CodeInline));
            }
            Event::SoftBreak => {
                self.current_spans
                    .push(StyledSpan::new(" ", self.current_style()));
            }
            Event::HardBreak => {
                self.current_spans
                    .push(StyledSpan::new("\n", self.current_style()));
            }
            Event::Rule => {
                self.flush_paragraph();
                self.lines.push(StyledLine {
                    spans: vec![StyledSpan::new(
                        "─".repeat(self.width.min(40)),
                        Style::Separator,
                    )],
                });
            }
            Event::TaskListMarker(checked) => {
                let marker = if checked { "[x] " } else { "[ ] " };
                self.current_spans
                    .push(StyledSpan::new(marker, Style::ListBullet));
            }
            // Raw HTML is dropped rather than echoed into the terminal.
            Event::Html(_) | Event::InlineHtml(_) => {}
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {}
        }
    }

    fn start_tag(&mut self, tag: &Tag) {
        match tag {
            Tag::Heading { .. } => {
                self.flush_paragraph();
                self.push_style(Style::Strong);
            }
            Tag::CodeBlock(kind) => {
                self.flush_paragraph();
                self.in_code_block = true;
                self.code_block_lang = match kind {
                    CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                    _ => None,
                };
                self.push_style(Style::CodeBlock);
            }
            Tag::List(start) => {
                self.flush_paragraph();
                self.list_stack.push(ListState {
                    ordered: *start,
                    current_item: start.unwrap_or(1),
                    items_emitted: 0,
                });
            }
            Tag::Item => {
                self.flush_paragraph();
                // Items are spaced apart like separate paragraphs.
                if self
                    .list_stack
                    .last()
                    .is_some_and(|list| list.items_emitted > 0)
                {
                    self.lines.push(StyledLine::empty());
                }
            }
            Tag::Emphasis => self.push_style(Style::Emphasis),
            Tag::Strong => self.push_style(Style::Strong),
            Tag::BlockQuote(_) => self.flush_paragraph(),
            // Paragraphs are implicit containers; links and the rest
            // render as body text.
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                self.flush_paragraph();
                if self.list_stack.is_empty() {
                    self.lines.push(StyledLine::empty());
                }
            }
            TagEnd::Heading(_) => {
                self.flush_paragraph();
                self.pop_style();
                self.lines.push(StyledLine::empty());
            }
            TagEnd::CodeBlock => {
                self.flush_code_block();
                self.in_code_block = false;
                self.pop_style();
                self.lines.push(StyledLine::empty());
            }
            TagEnd::List(_) => {
                self.list_stack.pop();
                if self.list_stack.is_empty() {
                    self.lines.push(StyledLine::empty());
                }
            }
            TagEnd::Item => {
                self.flush_list_item();
                if let Some(list) = self.list_stack.last_mut() {
                    list.current_item += 1;
                    list.items_emitted += 1;
                }
            }
            TagEnd::Emphasis | TagEnd::Strong => self.pop_style(),
            TagEnd::BlockQuote(_) => self.flush_paragraph(),
            _ => {}
        }
    }

    fn flush_paragraph(&mut self) {
        if self.current_spans.is_empty() {
            return;
        }
        let spans = std::mem::take(&mut self.current_spans);
        let opts = WrapOptions::new(self.width);
        self.lines.extend(wrap_styled_spans(&spans, &opts));
    }

    /// Code blocks are never wrapped; each source line renders as-is,
    /// bracketed by fences that keep the language tag visible.
    fn flush_code_block(&mut self) {
        if self.current_spans.is_empty() {
            return;
        }

        let spans = std::mem::take(&mut self.current_spans);
        let full_text: String = spans.iter().map(|s| s.text.as_str()).collect();

        let fence_text = match self.code_block_lang.take() {
            Some(lang) => format!("```{lang}"),
            None => "```".to_string(),
        };
        self.lines.push(StyledLine {
            spans: vec![StyledSpan::new(fence_text, Style::CodeFence)],
        });

        for line in full_text.trim_end_matches('\n').split('\n') {
            self.lines.push(StyledLine {
                spans: vec![
                    StyledSpan::new("  ", Style::Plain),
                    StyledSpan::new(line, Style::CodeBlock),
                ],
            });
        }

        self.lines.push(StyledLine {
            spans: vec![StyledSpan::new("```", Style::CodeFence)],
        });
    }

    fn flush_list_item(&mut self) {
        if self.current_spans.is_empty() {
            return;
        }

        let spans = std::mem::take(&mut self.current_spans);

        let (marker, marker_style) = match self.list_stack.last() {
            Some(list) if list.ordered.is_some() => {
                (format!("{}. ", list.current_item), Style::ListNumber)
            }
            _ => ("• ".to_string(), Style::ListBullet),
        };

        let indent = "  ".repeat(self.list_stack.len().saturating_sub(1));
        let marker_width = marker.width();

        let opts = WrapOptions {
            width: self.width,
            first_prefix: vec![
                StyledSpan::new(indent.clone(), Style::Plain),
                StyledSpan::new(marker, marker_style),
            ],
            rest_prefix: vec![StyledSpan::new(
                format!("{indent}{}", " ".repeat(marker_width)),
                Style::Plain,
            )],
        };

        self.lines.extend(wrap_styled_spans(&spans, &opts));
    }

    fn finish(mut self) -> Vec<StyledLine> {
        if !self.current_spans.is_empty() {
            if self.in_code_block {
                self.flush_code_block();
            } else {
                self.flush_paragraph();
            }
        }

        while self.lines.last().is_some_and(|l| l.spans.is_empty()) {
            self.lines.pop();
        }

        if self.lines.is_empty() {
            self.lines.push(StyledLine::empty());
        }

        self.lines
    }
}
