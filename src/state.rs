//! Top-level application state.

use crate::features::toggle::{OutputPanels, ToggleState};
use crate::features::transcript::TranscriptState;
use crate::message::Message;

/// All mutable state for the app.
///
/// Mutated only by the reducer in `update`; `render` reads it and draws
/// a frame. The output panels are derived from the transcript and
/// refreshed whenever the message sequence changes.
#[derive(Debug, Default)]
pub struct AppState {
    pub transcript: TranscriptState,
    pub toggle: ToggleState,
    pub panels: OutputPanels,
    /// Spinner animation frame counter, advanced on Tick.
    pub spinner_frame: usize,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(messages: Vec<Message>, is_loading: bool) -> Self {
        let panels = OutputPanels::from_messages(&messages);
        AppState {
            transcript: TranscriptState::new(messages, is_loading),
            panels,
            ..AppState::default()
        }
    }

    /// Re-derives the output panels after a transcript change.
    pub fn refresh_panels(&mut self) {
        self.panels = OutputPanels::from_messages(self.transcript.messages());
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::message::{Part, Role, ToolInvocationState};

    #[test]
    fn test_panels_derived_at_construction() {
        let state = AppState::new(
            vec![Message::with_parts(
                "a1",
                Role::Assistant,
                vec![Part::tool_invocation(
                    "generateComponent",
                    ToolInvocationState::Result,
                    Some(json!({"code": "<Card />"})),
                )],
            )],
            false,
        );
        assert_eq!(state.panels.code, "<Card />");
    }

    #[test]
    fn test_refresh_panels_tracks_new_messages() {
        let mut state = AppState::new(vec![], false);
        assert_eq!(state.panels, OutputPanels::default());

        state.transcript.push_message(Message::with_parts(
            "a1",
            Role::Assistant,
            vec![Part::tool_invocation(
                "generateComponent",
                ToolInvocationState::Result,
                Some(json!({"code": "<Nav />"})),
            )],
        ));
        state.refresh_panels();
        assert_eq!(state.panels.code, "<Nav />");
    }
}
