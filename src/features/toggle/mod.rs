//! Preview/code output toggle: state machine, tab bar, and panels.

pub mod panels;
pub mod render;
pub mod state;

pub use panels::OutputPanels;
pub use render::{render_panel, render_tab_bar};
pub use state::{ToggleState, ViewTab};
