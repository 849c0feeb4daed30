//! Markdown rendering for assistant message bodies.

mod parse;
mod wrap;

pub use parse::render_markdown;
pub use wrap::{WrapOptions, wrap_styled_spans};
