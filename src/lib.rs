//! Terminal chat front-end for an AI component generator.
//!
//! Renders a conversation transcript (typed message parts, markdown for
//! assistant text, tool-invocation badges, a generating indicator) next
//! to a preview/code output toggle. Messages arrive already decoded into
//! typed parts and are treated as immutable render inputs; all mutation
//! flows through the reducer in [`update`].

pub mod common;
pub mod events;
pub mod features;
pub mod markdown;
pub mod message;
pub mod render;
pub mod state;
pub mod terminal;
pub mod update;

pub use events::UiEvent;
pub use render::render;
pub use state::AppState;
pub use update::update;
