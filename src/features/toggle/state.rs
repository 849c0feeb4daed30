//! Preview/code toggle state machine.

use std::cell::Cell;

use ratatui::layout::{Position, Rect};

/// The two output views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewTab {
    #[default]
    Preview,
    Code,
}

impl ViewTab {
    pub fn label(self) -> &'static str {
        match self {
            ViewTab::Preview => "Preview",
            ViewTab::Code => "Code",
        }
    }

    pub fn other(self) -> Self {
        match self {
            ViewTab::Preview => ViewTab::Code,
            ViewTab::Code => ViewTab::Preview,
        }
    }
}

/// Toggle state: which view is active, plus the tab hit areas recorded at
/// render time for mouse click resolution.
///
/// The hit areas live in `Cell`s so the render pass can record them
/// without taking `&mut` state. Not persisted; a fresh state starts on
/// `Preview`.
#[derive(Debug, Default)]
pub struct ToggleState {
    active: ViewTab,
    preview_tab_area: Cell<Rect>,
    code_tab_area: Cell<Rect>,
}

impl ToggleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> ViewTab {
        self.active
    }

    /// Applies a user selection. Selecting the already-active tab is a
    /// no-op; returns whether the active view changed.
    pub fn select(&mut self, tab: ViewTab) -> bool {
        if self.active == tab {
            return false;
        }
        self.active = tab;
        true
    }

    /// Switches to the other view (the Tab key binding).
    pub fn cycle(&mut self) {
        self.active = self.active.other();
    }

    /// Records where a tab was drawn this frame.
    pub fn record_tab_area(&self, tab: ViewTab, area: Rect) {
        match tab {
            ViewTab::Preview => self.preview_tab_area.set(area),
            ViewTab::Code => self.code_tab_area.set(area),
        }
    }

    /// Resolves a mouse position against the recorded tab areas.
    pub fn tab_at(&self, column: u16, row: u16) -> Option<ViewTab> {
        let position = Position::new(column, row);
        if self.preview_tab_area.get().contains(position) {
            Some(ViewTab::Preview)
        } else if self.code_tab_area.get().contains(position) {
            Some(ViewTab::Code)
        } else {
            None
        }
    }
}
