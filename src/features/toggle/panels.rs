//! Output panel content derived from completed tool invocations.

use serde_json::Value;

use crate::message::{Message, Part};

const EMPTY_PREVIEW: &str = "Nothing to preview yet. Ask for a component to get started.";
const EMPTY_CODE: &str = "No generated code yet.";

/// Content for the two output panels.
///
/// Derived from the most recent completed tool invocation whose result
/// carries a `code` field; falls back to placeholder text before the
/// first generation completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPanels {
    pub preview: String,
    pub code: String,
    /// Language tag for the code panel, when the result names one.
    pub language: Option<String>,
}

impl Default for OutputPanels {
    fn default() -> Self {
        OutputPanels {
            preview: EMPTY_PREVIEW.to_string(),
            code: EMPTY_CODE.to_string(),
            language: None,
        }
    }
}

impl OutputPanels {
    /// Scans the thread for the latest completed generation result.
    pub fn from_messages(messages: &[Message]) -> Self {
        messages
            .iter()
            .rev()
            .filter_map(|message| message.parts.as_deref())
            .flat_map(|parts| parts.iter().rev())
            .filter_map(|part| match part {
                Part::ToolInvocation { tool_invocation } if tool_invocation.is_completed() => {
                    tool_invocation.result.as_ref().and_then(Self::from_result)
                }
                _ => None,
            })
            .next()
            .unwrap_or_default()
    }

    fn from_result(result: &Value) -> Option<Self> {
        let code = result.get("code")?.as_str()?.to_string();
        let preview = result
            .get("preview")
            .and_then(Value::as_str)
            .map_or_else(|| EMPTY_PREVIEW.to_string(), ToString::to_string);
        let language = result
            .get("language")
            .and_then(Value::as_str)
            .map(ToString::to_string);
        Some(OutputPanels {
            preview,
            code,
            language,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::message::{Role, ToolInvocationState};

    #[test]
    fn test_placeholders_before_first_result() {
        let panels = OutputPanels::from_messages(&[]);
        assert_eq!(panels, OutputPanels::default());
    }

    #[test]
    fn test_latest_completed_result_wins() {
        let messages = vec![
            Message::with_parts(
                "a1",
                Role::Assistant,
                vec![Part::tool_invocation(
                    "generateComponent",
                    ToolInvocationState::Result,
                    Some(json!({"code": "old", "preview": "old preview"})),
                )],
            ),
            Message::with_parts(
                "a2",
                Role::Assistant,
                vec![Part::tool_invocation(
                    "generateComponent",
                    ToolInvocationState::Result,
                    Some(json!({"code": "new", "language": "jsx"})),
                )],
            ),
        ];
        let panels = OutputPanels::from_messages(&messages);
        assert_eq!(panels.code, "new");
        assert_eq!(panels.language.as_deref(), Some("jsx"));
    }

    #[test]
    fn test_later_result_wins_within_one_message() {
        let messages = vec![Message::with_parts(
            "a1",
            Role::Assistant,
            vec![
                Part::tool_invocation(
                    "generateComponent",
                    ToolInvocationState::Result,
                    Some(json!({"code": "first"})),
                ),
                Part::tool_invocation(
                    "generateComponent",
                    ToolInvocationState::Result,
                    Some(json!({"code": "second"})),
                ),
            ],
        )];
        let panels = OutputPanels::from_messages(&messages);
        assert_eq!(panels.code, "second");
    }

    #[test]
    fn test_incomplete_invocation_ignored() {
        let messages = vec![Message::with_parts(
            "a1",
            Role::Assistant,
            vec![Part::tool_invocation(
                "generateComponent",
                ToolInvocationState::Pending,
                None,
            )],
        )];
        let panels = OutputPanels::from_messages(&messages);
        assert_eq!(panels, OutputPanels::default());
    }

    #[test]
    fn test_result_without_code_field_ignored() {
        let messages = vec![Message::with_parts(
            "a1",
            Role::Assistant,
            vec![Part::tool_invocation(
                "search",
                ToolInvocationState::Result,
                Some(json!({"hits": 3})),
            )],
        )];
        let panels = OutputPanels::from_messages(&messages);
        assert_eq!(panels, OutputPanels::default());
    }
}
