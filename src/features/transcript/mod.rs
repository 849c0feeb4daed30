//! Conversation transcript: message rows, role alignment, tool badges,
//! the generating indicator, and the onboarding panel.

pub mod render;
pub mod row;
pub mod state;
pub mod style;
pub(crate) mod wrap;

pub use render::{Row, RowAlignment, build_rows, render_transcript};
pub use state::TranscriptState;
