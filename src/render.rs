//! Frame composition: transcript pane, output pane, status line.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::features::toggle::{render_panel, render_tab_bar};
use crate::features::transcript::render_transcript;
use crate::features::transcript::row::SPINNER_FRAMES;
use crate::state::AppState;

/// Draws one frame from the current state. Pure with respect to app
/// state; the only interior writes are the recorded tab hit areas.
pub fn render(state: &AppState, frame: &mut Frame) {
    let [main_area, status_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());
    let [chat_area, output_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .areas(main_area);

    render_chat(state, frame, chat_area);
    render_output(state, frame, output_area);
    frame.render_widget(status_line(state), status_area);
}

fn render_chat(state: &AppState, frame: &mut Frame, area: Rect) {
    let block = Block::bordered().title(" Chat ");
    let inner = block.inner(area);

    let lines = render_transcript(
        &state.transcript,
        inner.width as usize,
        state.spinner_frame,
    );

    // Pin the view to the newest messages.
    let overflow = lines.len().saturating_sub(inner.height as usize);
    let scroll = u16::try_from(overflow).unwrap_or(u16::MAX);

    frame.render_widget(Paragraph::new(lines).block(block).scroll((scroll, 0)), area);
}

fn render_output(state: &AppState, frame: &mut Frame, area: Rect) {
    let block = Block::bordered().title(" Output ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [tabs_area, panel_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).areas(inner);

    frame.render_widget(render_tab_bar(&state.toggle, tabs_area), tabs_area);

    let panel_lines = render_panel(&state.toggle, &state.panels, panel_area.width as usize);
    frame.render_widget(Paragraph::new(panel_lines), panel_area);
}

fn status_line(state: &AppState) -> Line<'static> {
    let hint_style = Style::default().fg(Color::DarkGray);
    let key_style = Style::default()
        .fg(Color::Gray)
        .add_modifier(Modifier::BOLD);

    let mut spans = vec![
        Span::styled(" p", key_style),
        Span::styled(" preview  ", hint_style),
        Span::styled("c", key_style),
        Span::styled(" code  ", hint_style),
        Span::styled("tab", key_style),
        Span::styled(" switch  ", hint_style),
        Span::styled("q", key_style),
        Span::styled(" quit", hint_style),
    ];

    if state.transcript.is_loading {
        let spinner = SPINNER_FRAMES[state.spinner_frame % SPINNER_FRAMES.len()];
        spans.push(Span::styled(
            format!("  {spinner} generating"),
            Style::default().fg(Color::Cyan),
        ));
    }

    Line::from(spans)
}
