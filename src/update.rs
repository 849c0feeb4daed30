//! The reducer: the only place application state mutates.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::events::UiEvent;
use crate::features::toggle::ViewTab;
use crate::state::AppState;

/// Applies one event to the state.
pub fn update(state: &mut AppState, event: &UiEvent) {
    match event {
        UiEvent::Tick => {
            state.spinner_frame = state.spinner_frame.wrapping_add(1);
        }
        UiEvent::Terminal(Event::Key(key)) => handle_key(state, key),
        UiEvent::Terminal(Event::Mouse(mouse)) => handle_mouse(state, mouse),
        UiEvent::Terminal(_) => {}
    }
}

fn handle_key(state: &mut AppState, key: &KeyEvent) {
    // Release/repeat events arrive on some terminals; only act on press.
    if key.kind != KeyEventKind::Press {
        return;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.should_quit = true;
        }
        KeyCode::Char('q') | KeyCode::Esc => {
            state.should_quit = true;
        }
        KeyCode::Char('p') => {
            state.toggle.select(ViewTab::Preview);
        }
        KeyCode::Char('c') => {
            state.toggle.select(ViewTab::Code);
        }
        KeyCode::Tab => {
            state.toggle.cycle();
        }
        _ => {}
    }
}

fn handle_mouse(state: &mut AppState, mouse: &MouseEvent) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    if let Some(tab) = state.toggle.tab_at(mouse.column, mouse.row) {
        state.toggle.select(tab);
    }
}
