//! Wire data model for the conversation thread.
//!
//! Messages arrive from the generation backend already decoded into typed
//! parts. This module only defines the shapes; it never mutates them. The
//! renderer treats every `Message` as an immutable snapshot.

use serde::Deserialize;
use serde_json::Value;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single message in the thread.
///
/// Newer messages carry `parts`; older ones may only carry `content`.
/// When both are present, `parts` wins and `content` is ignored.
/// Both absent is a valid empty/pending state, not an error.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    /// Stable unique id assigned upstream.
    pub id: String,
    pub role: Role,
    #[serde(default)]
    pub parts: Option<Vec<Part>>,
    /// Legacy fallback body, used only when `parts` is absent.
    #[serde(default)]
    pub content: Option<String>,
}

impl Message {
    /// Creates a parts-based message.
    pub fn with_parts(id: impl Into<String>, role: Role, parts: Vec<Part>) -> Self {
        Message {
            id: id.into(),
            role,
            parts: Some(parts),
            content: None,
        }
    }

    /// Creates a legacy content-only message.
    pub fn with_content(id: impl Into<String>, role: Role, content: impl Into<String>) -> Self {
        Message {
            id: id.into(),
            role,
            parts: None,
            content: Some(content.into()),
        }
    }

    /// Creates an empty/pending message (no parts, no content).
    pub fn pending(id: impl Into<String>, role: Role) -> Self {
        Message {
            id: id.into(),
            role,
            parts: None,
            content: None,
        }
    }
}

/// One typed fragment of a message body.
///
/// The `Unknown` arm absorbs wire variants this version does not know about;
/// they deserialize successfully and render nothing.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum Part {
    #[serde(rename = "text")]
    Text { text: String },

    #[serde(rename = "reasoning")]
    Reasoning { reasoning: String },

    #[serde(rename = "tool-invocation")]
    ToolInvocation {
        #[serde(rename = "toolInvocation")]
        tool_invocation: ToolInvocation,
    },

    /// Source citation; the payload shape is backend-defined.
    #[serde(rename = "source")]
    Source { source: Value },

    /// Boundary between generation steps, rendered as a separator.
    #[serde(rename = "step-start")]
    StepStart,

    #[serde(other)]
    Unknown,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    pub fn reasoning(reasoning: impl Into<String>) -> Self {
        Part::Reasoning {
            reasoning: reasoning.into(),
        }
    }

    pub fn tool_invocation(
        tool_name: impl Into<String>,
        state: ToolInvocationState,
        result: Option<Value>,
    ) -> Self {
        Part::ToolInvocation {
            tool_invocation: ToolInvocation {
                tool_name: tool_name.into(),
                state,
                result,
            },
        }
    }
}

/// Lifecycle state of a tool invocation as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolInvocationState {
    Pending,
    Result,
}

/// A record of an external tool call made during generation.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolInvocation {
    #[serde(rename = "toolName")]
    pub tool_name: String,
    pub state: ToolInvocationState,
    #[serde(default)]
    pub result: Option<Value>,
}

impl ToolInvocation {
    /// Whether the badge should show the completed state.
    ///
    /// Requires `state == Result` AND a truthy result payload. A `result`
    /// state with an absent or falsy payload (null, false, 0, "") stays in
    /// the running state; the backend reports `result` before the payload
    /// lands, and the payload is what marks real completion.
    pub fn is_completed(&self) -> bool {
        self.state == ToolInvocationState::Result
            && self.result.as_ref().is_some_and(value_is_truthy)
    }
}

/// JS-style truthiness for a JSON value.
fn value_is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
