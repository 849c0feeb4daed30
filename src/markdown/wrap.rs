//! Width-aware wrapping of styled spans with hanging-indent support.

use unicode_width::UnicodeWidthStr;

use crate::features::transcript::style::{Style, StyledLine, StyledSpan};

/// Options for wrapping styled spans with hanging indents.
#[derive(Debug, Clone, Default)]
pub struct WrapOptions {
    /// Maximum display width for lines.
    pub width: usize,
    /// Prefix spans for the first line (e.g. a list marker).
    pub first_prefix: Vec<StyledSpan>,
    /// Prefix spans for continuation lines (alignment padding).
    pub rest_prefix: Vec<StyledSpan>,
}

impl WrapOptions {
    /// Wrap options with just a width, no prefixes.
    pub fn new(width: usize) -> Self {
        Self {
            width,
            first_prefix: vec![],
            rest_prefix: vec![],
        }
    }
}

fn spans_width(spans: &[StyledSpan]) -> usize {
    spans.iter().map(|s| s.text.width()).sum()
}

/// Accumulates the line currently being built.
struct LineBuilder<'a> {
    lines: Vec<StyledLine>,
    pending: Vec<StyledSpan>,
    pending_width: usize,
    on_first_line: bool,
    first_width: usize,
    rest_width: usize,
    first_prefix: &'a [StyledSpan],
    rest_prefix: &'a [StyledSpan],
}

impl<'a> LineBuilder<'a> {
    fn new(opts: &'a WrapOptions) -> Self {
        let first_width = opts.width.saturating_sub(spans_width(&opts.first_prefix));
        let rest_width = opts.width.saturating_sub(spans_width(&opts.rest_prefix));
        Self {
            lines: Vec::new(),
            pending: Vec::new(),
            pending_width: 0,
            on_first_line: true,
            first_width,
            rest_width,
            first_prefix: &opts.first_prefix,
            rest_prefix: &opts.rest_prefix,
        }
    }

    fn available(&self) -> usize {
        if self.on_first_line {
            self.first_width
        } else {
            self.rest_width
        }
    }

    fn remaining(&self) -> usize {
        self.available().saturating_sub(self.pending_width)
    }

    fn push(&mut self, span: StyledSpan) {
        self.pending_width += span.text.width();
        self.pending.push(span);
    }

    fn break_line(&mut self) {
        let prefix = if self.on_first_line {
            self.first_prefix.to_vec()
        } else {
            self.rest_prefix.to_vec()
        };
        let mut spans = prefix;
        spans.append(&mut self.pending);
        self.lines.push(StyledLine { spans });
        self.pending_width = 0;
        self.on_first_line = false;
    }

    fn finish(mut self) -> Vec<StyledLine> {
        if !self.pending.is_empty() {
            self.break_line();
        }
        if self.lines.is_empty() {
            self.lines.push(StyledLine {
                spans: self.first_prefix.to_vec(),
            });
        }
        self.lines
    }
}

/// Wraps styled spans while preserving styles across line breaks.
///
/// Normal text wraps at word boundaries with whitespace collapsed; code
/// spans keep whitespace intact and break by character when they must.
/// Newlines inside a span force a break.
pub fn wrap_styled_spans(spans: &[StyledSpan], opts: &WrapOptions) -> Vec<StyledLine> {
    if opts.width == 0 || spans.is_empty() {
        let mut all = opts.first_prefix.clone();
        all.extend(spans.iter().cloned());
        return vec![StyledLine { spans: all }];
    }

    let mut builder = LineBuilder::new(opts);

    for span in spans {
        if span.text.contains('\n') {
            for (i, part) in span.text.split('\n').enumerate() {
                if i > 0 {
                    builder.break_line();
                }
                if !part.is_empty() {
                    place_span(&StyledSpan::new(part, span.style), &mut builder);
                }
            }
        } else {
            place_span(span, &mut builder);
        }
    }

    builder.finish()
}

fn place_span(span: &StyledSpan, builder: &mut LineBuilder) {
    if matches!(span.style, Style::CodeInline | Style::CodeBlock) {
        place_code_span(span, builder);
    } else {
        place_text_span(span, builder);
    }
}

/// Code keeps its whitespace; break by character only when nothing fits.
fn place_code_span(span: &StyledSpan, builder: &mut LineBuilder) {
    let span_width = span.text.width();

    if span_width <= builder.remaining() {
        builder.push(span.clone());
        return;
    }

    if span_width <= builder.rest_width && builder.pending_width > 0 {
        builder.break_line();
        builder.push(span.clone());
        return;
    }

    let fragments = break_by_width(span, builder.remaining().max(1));
    for (i, frag) in fragments.into_iter().enumerate() {
        if i > 0 && frag.text.width() > builder.remaining() {
            builder.break_line();
        }
        if !frag.text.is_empty() {
            builder.push(frag);
        }
    }
}

fn place_text_span(span: &StyledSpan, builder: &mut LineBuilder) {
    let leading_space = span.text.starts_with(|c: char| c.is_whitespace());
    let trailing_space = span.text.ends_with(|c: char| c.is_whitespace());
    let words: Vec<&str> = span.text.split_whitespace().collect();

    if words.is_empty() {
        // Whitespace-only span: keep one separating space.
        if builder.pending_width > 0 && builder.remaining() > 0 {
            builder.push(StyledSpan::new(" ", span.style));
        }
        return;
    }

    if leading_space && builder.pending_width > 0 && builder.remaining() > 0 {
        builder.push(StyledSpan::new(" ", span.style));
    }

    for (i, word) in words.iter().enumerate() {
        let word_width = word.width();

        if i > 0 {
            if builder.pending_width + 1 + word_width <= builder.available() {
                builder.push(StyledSpan::new(" ", span.style));
            } else {
                builder.break_line();
            }
        }

        if word_width <= builder.remaining() {
            builder.push(StyledSpan::new(*word, span.style));
        } else if word_width <= builder.rest_width && builder.pending_width > 0 {
            builder.break_line();
            builder.push(StyledSpan::new(*word, span.style));
        } else {
            // Word wider than any line; hard-break it.
            if builder.pending_width > 0 {
                builder.break_line();
            }
            let fragments =
                break_by_width(&StyledSpan::new(*word, span.style), builder.available().max(1));
            for frag in fragments {
                if frag.text.width() > builder.remaining() && builder.pending_width > 0 {
                    builder.break_line();
                }
                if !frag.text.is_empty() {
                    builder.push(frag);
                }
            }
        }
    }

    if trailing_space && builder.remaining() > 0 {
        builder.push(StyledSpan::new(" ", span.style));
    }
}

/// Splits a span into fragments no wider than `max_width` display columns.
/// Zero-width characters stay with the preceding fragment.
fn break_by_width(span: &StyledSpan, max_width: usize) -> Vec<StyledSpan> {
    use unicode_width::UnicodeWidthChar;

    let mut parts = Vec::new();
    let mut current = String::new();
    let mut current_width: usize = 0;

    for ch in span.text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if ch_width == 0 {
            current.push(ch);
            continue;
        }
        if current_width + ch_width > max_width && !current.is_empty() {
            parts.push(StyledSpan::new(std::mem::take(&mut current), span.style));
            current_width = 0;
        }
        current.push(ch);
        current_width += ch_width;
    }

    if !current.is_empty() {
        parts.push(StyledSpan::new(current, span.style));
    }
    if parts.is_empty() {
        parts.push(StyledSpan::new("", span.style));
    }

    parts
}
