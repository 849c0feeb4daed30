//! Transcript display state: the message sequence and the loading flag.

use crate::message::{Message, Role};

/// State for the conversation transcript.
///
/// Messages and the loading flag are render inputs supplied by the message
/// source; this state never mutates the messages themselves.
#[derive(Debug, Default)]
pub struct TranscriptState {
    messages: Vec<Message>,
    /// True while a generation is in flight upstream.
    pub is_loading: bool,
}

impl TranscriptState {
    pub fn new(messages: Vec<Message>, is_loading: bool) -> Self {
        TranscriptState {
            messages,
            is_loading,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Replaces the message sequence (a new snapshot from the source).
    pub fn set_messages(&mut self, messages: Vec<Message>) {
        self.messages = messages;
    }

    pub fn push_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Whether the message at `index` should carry the generating indicator.
    ///
    /// Positional, derived state: recomputed from the final element on each
    /// render rather than stored, so it can never drift from the sequence.
    pub fn is_generating_slot(&self, index: usize) -> bool {
        self.is_loading
            && index + 1 == self.messages.len()
            && self.messages[index].role == Role::Assistant
    }
}
