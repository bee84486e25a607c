//! Turn decoding
//!
//! A completion response is interpreted once per loop iteration. Two
//! wire protocols exist: native structured tool calls, and the legacy
//! JSON-in-text action format. Both are implementations of one
//! [`TurnDecoder`] seam so the agent loop stays protocol-agnostic.

use crate::completion::response::{CompletionResponse, StopReason, ToolUse};
use crate::util::strip_code_fences;
use serde::Deserialize;

/// Sentinel action name that terminates the legacy loop
pub const FINAL_ANSWER_ACTION: &str = "final_answer";

/// The interpreted meaning of one completion response
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedTurn {
    /// The turn produced the final answer text
    FinalAnswer(String),
    /// A legacy-protocol tool action
    Action {
        thought: String,
        tool: String,
        args: serde_json::Value,
    },
    /// Native tool-use requests, to be answered with tool results
    ToolRequests(Vec<ToolUse>),
    /// The model declined to answer
    Refusal,
    /// Neither text nor tool calls
    Empty,
}

/// Decodes one completion response into a [`DecodedTurn`]
pub trait TurnDecoder: Send + Sync {
    fn decode(&self, response: &CompletionResponse) -> DecodedTurn;
}

/// Decoder for models with structured tool-call support
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeTurnDecoder;

impl TurnDecoder for NativeTurnDecoder {
    fn decode(&self, response: &CompletionResponse) -> DecodedTurn {
        if response.stop_reason == StopReason::Refusal {
            return DecodedTurn::Refusal;
        }
        if response.has_tool_calls() {
            let calls = response.tool_calls().into_iter().cloned().collect();
            return DecodedTurn::ToolRequests(calls);
        }
        let text = response.text_content();
        if text.trim().is_empty() {
            return DecodedTurn::Empty;
        }
        DecodedTurn::FinalAnswer(text)
    }
}

/// Legacy action object emitted inside the response text
#[derive(Debug, Deserialize)]
struct LegacyAction {
    #[serde(default)]
    thought: String,
    action: String,
    #[serde(default)]
    args: serde_json::Value,
}

/// Decoder for the legacy JSON-in-text protocol
///
/// The model is prompted to answer with a single JSON object
/// `{"thought": ..., "action": ..., "args": {...}}` per step, and with
/// the `final_answer` action to terminate. Text that carries no such
/// object is treated as the final answer itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTurnDecoder;

impl JsonTurnDecoder {
    fn extract_action(text: &str) -> Option<LegacyAction> {
        let stripped = strip_code_fences(text);
        if let Ok(action) = serde_json::from_str::<LegacyAction>(stripped) {
            return Some(action);
        }
        // Tolerate prose around the object: parse the outermost braces
        let start = stripped.find('{')?;
        let end = stripped.rfind('}')?;
        if end <= start {
            return None;
        }
        serde_json::from_str::<LegacyAction>(&stripped[start..=end]).ok()
    }
}

impl TurnDecoder for JsonTurnDecoder {
    fn decode(&self, response: &CompletionResponse) -> DecodedTurn {
        if response.stop_reason == StopReason::Refusal {
            return DecodedTurn::Refusal;
        }
        let text = response.text_content();
        if text.trim().is_empty() {
            return DecodedTurn::Empty;
        }

        match Self::extract_action(&text) {
            Some(action) if action.action == FINAL_ANSWER_ACTION => {
                let answer = action
                    .args
                    .get("text")
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
                    .unwrap_or(action.thought);
                DecodedTurn::FinalAnswer(answer)
            }
            Some(action) => DecodedTurn::Action {
                thought: action.thought,
                tool: action.action,
                args: action.args,
            },
            // No action object: the whole text is the answer
            None => DecodedTurn::FinalAnswer(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::response::ContentBlock;
    use serde_json::json;

    fn text_response(text: &str) -> CompletionResponse {
        CompletionResponse::text_only(text, "test-model")
    }

    #[test]
    fn test_native_decodes_tool_requests() {
        let response = CompletionResponse::new(
            vec![
                ContentBlock::text("Let me check."),
                ContentBlock::tool_use("t1", "web_search", json!({"q": "rust"})),
            ],
            StopReason::ToolUse,
            "m",
        );
        match NativeTurnDecoder.decode(&response) {
            DecodedTurn::ToolRequests(calls) => {
                assert_eq!(calls.len(), 1);
                assert_eq!(calls[0].name, "web_search");
            }
            other => panic!("unexpected turn: {:?}", other),
        }
    }

    #[test]
    fn test_native_text_is_final_answer() {
        let turn = NativeTurnDecoder.decode(&text_response("All done."));
        assert_eq!(turn, DecodedTurn::FinalAnswer("All done.".to_string()));
    }

    #[test]
    fn test_native_empty_response() {
        let turn = NativeTurnDecoder.decode(&text_response("  \n"));
        assert_eq!(turn, DecodedTurn::Empty);
    }

    #[test]
    fn test_native_refusal() {
        let mut response = text_response("I can't do that.");
        response.stop_reason = StopReason::Refusal;
        assert_eq!(NativeTurnDecoder.decode(&response), DecodedTurn::Refusal);
    }

    #[test]
    fn test_json_decodes_action() {
        let text = r#"{"thought": "Need data", "action": "web_search", "args": {"q": "rust"}}"#;
        match JsonTurnDecoder.decode(&text_response(text)) {
            DecodedTurn::Action {
                thought,
                tool,
                args,
            } => {
                assert_eq!(thought, "Need data");
                assert_eq!(tool, "web_search");
                assert_eq!(args["q"], "rust");
            }
            other => panic!("unexpected turn: {:?}", other),
        }
    }

    #[test]
    fn test_json_decodes_fenced_action() {
        let text = "```json\n{\"thought\": \"t\", \"action\": \"read_file\", \"args\": {\"path\": \"x\"}}\n```";
        match JsonTurnDecoder.decode(&text_response(text)) {
            DecodedTurn::Action { tool, .. } => assert_eq!(tool, "read_file"),
            other => panic!("unexpected turn: {:?}", other),
        }
    }

    #[test]
    fn test_json_final_answer_action() {
        let text = r#"{"thought": "Task completed.", "action": "final_answer", "args": {"text": "42"}}"#;
        assert_eq!(
            JsonTurnDecoder.decode(&text_response(text)),
            DecodedTurn::FinalAnswer("42".to_string())
        );
    }

    #[test]
    fn test_json_final_answer_falls_back_to_thought() {
        let text = r#"{"thought": "Done already.", "action": "final_answer", "args": {}}"#;
        assert_eq!(
            JsonTurnDecoder.decode(&text_response(text)),
            DecodedTurn::FinalAnswer("Done already.".to_string())
        );
    }

    #[test]
    fn test_json_plain_text_is_final_answer() {
        let turn = JsonTurnDecoder.decode(&text_response("Just a sentence."));
        assert_eq!(
            turn,
            DecodedTurn::FinalAnswer("Just a sentence.".to_string())
        );
    }

    #[test]
    fn test_json_action_embedded_in_prose() {
        let text = "Sure, next step:\n{\"action\": \"list_dir\", \"args\": {\"path\": \".\"}}";
        match JsonTurnDecoder.decode(&text_response(text)) {
            DecodedTurn::Action { tool, .. } => assert_eq!(tool, "list_dir"),
            other => panic!("unexpected turn: {:?}", other),
        }
    }

    #[test]
    fn test_json_empty_response() {
        assert_eq!(JsonTurnDecoder.decode(&text_response("")), DecodedTurn::Empty);
    }
}
