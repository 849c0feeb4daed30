//! Input events consumed by the reducer.

use crossterm::event::Event;

/// One discrete input to the reducer.
#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Animation tick; advances the spinner frame.
    Tick,
    /// A raw terminal event (key, mouse, resize, ...).
    Terminal(Event),
}
