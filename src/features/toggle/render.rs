//! Tab bar and output panel rendering.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style as RatStyle};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use super::panels::OutputPanels;
use super::state::{ToggleState, ViewTab};
use crate::features::transcript::wrap::{wrap_chars, wrap_text};

const TAB_GAP: u16 = 1;

/// Renders the tab bar into a single line and records each tab's hit
/// area for click resolution.
pub fn render_tab_bar(state: &ToggleState, area: Rect) -> Line<'static> {
    let mut spans = Vec::new();
    let mut x = area.x;

    for tab in [ViewTab::Preview, ViewTab::Code] {
        let label = format!(" {} ", tab.label());
        let tab_width = u16::try_from(label.width()).unwrap_or(u16::MAX);
        state.record_tab_area(tab, Rect::new(x, area.y, tab_width, 1));

        spans.push(Span::styled(label, tab_style(state.active() == tab)));
        spans.push(Span::raw(" ".repeat(TAB_GAP as usize)));
        x = x.saturating_add(tab_width).saturating_add(TAB_GAP);
    }

    Line::from(spans)
}

fn tab_style(active: bool) -> RatStyle {
    if active {
        RatStyle::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        RatStyle::default().fg(Color::DarkGray)
    }
}

/// Renders the active panel's content. The inactive panel contributes
/// nothing to the output.
pub fn render_panel(
    state: &ToggleState,
    panels: &OutputPanels,
    width: usize,
) -> Vec<Line<'static>> {
    match state.active() {
        ViewTab::Preview => preview_lines(&panels.preview, width),
        ViewTab::Code => code_lines(panels, width),
    }
}

fn preview_lines(preview: &str, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for paragraph in preview.split('\n') {
        if paragraph.is_empty() {
            lines.push(Line::default());
            continue;
        }
        for wrapped in wrap_text(paragraph, width.max(10)) {
            lines.push(Line::styled(
                wrapped,
                RatStyle::default().fg(Color::White),
            ));
        }
    }
    lines
}

/// Code is shown with line numbers; long lines hard-wrap rather than
/// truncate so the full source stays visible.
fn code_lines(panels: &OutputPanels, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if let Some(language) = &panels.language {
        lines.push(Line::styled(
            language.clone(),
            RatStyle::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ));
    }

    let source_lines: Vec<&str> = panels.code.split('\n').collect();
    let gutter_width = source_lines.len().to_string().len().max(2);
    let body_width = width.saturating_sub(gutter_width + 1).max(10);

    for (number, source_line) in source_lines.iter().enumerate() {
        for (i, fragment) in wrap_chars(source_line, body_width).into_iter().enumerate() {
            let gutter = if i == 0 {
                format!("{:>gutter_width$} ", number + 1)
            } else {
                " ".repeat(gutter_width + 1)
            };
            lines.push(Line::from(vec![
                Span::styled(gutter, RatStyle::default().fg(Color::DarkGray)),
                Span::styled(fragment, RatStyle::default().fg(Color::Cyan)),
            ]));
        }
    }

    lines
}
