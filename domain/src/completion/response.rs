//! Structured response types for model completions
//!
//! A completion can carry plain text, native tool-use blocks, or both.
//! These types let the agent loop branch on structure instead of
//! re-parsing raw strings.

use serde::{Deserialize, Serialize};

/// A native tool invocation requested by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolUse {
    /// Correlation id assigned by the model
    pub id: String,
    /// Tool name to invoke
    pub name: String,
    /// Arguments as a JSON object
    pub input: serde_json::Value,
}

/// A block of content within a completion response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Plain text content
    Text { text: String },
    /// A native tool-use request
    ToolUse(ToolUse),
}

impl ContentBlock {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            text: content.into(),
        }
    }

    pub fn tool_use(
        id: impl Into<String>,
        name: impl Into<String>,
        input: serde_json::Value,
    ) -> Self {
        Self::ToolUse(ToolUse {
            id: id.into(),
            name: name.into(),
            input,
        })
    }
}

/// Why the model stopped generating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Natural end of the turn
    EndTurn,
    /// The model wants tool results before continuing
    ToolUse,
    /// Output token limit reached
    MaxTokens,
    /// The model declined to answer
    Refusal,
    /// Provider-specific reason not covered above
    Other,
}

/// A full completion response from the gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Ordered content blocks
    pub content: Vec<ContentBlock>,
    /// Why generation stopped
    pub stop_reason: StopReason,
    /// Model that produced the response
    pub model: String,
}

impl CompletionResponse {
    pub fn new(content: Vec<ContentBlock>, stop_reason: StopReason, model: impl Into<String>) -> Self {
        Self {
            content,
            stop_reason,
            model: model.into(),
        }
    }

    /// Convenience constructor for a text-only response
    pub fn text_only(text: impl Into<String>, model: impl Into<String>) -> Self {
        Self::new(vec![ContentBlock::text(text)], StopReason::EndTurn, model)
    }

    /// Concatenated text of all text blocks
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("")
    }

    /// All tool-use blocks in order
    pub fn tool_calls(&self) -> Vec<&ToolUse> {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::ToolUse(tool_use) => Some(tool_use),
                _ => None,
            })
            .collect()
    }

    /// Whether the response contains any tool-use block
    pub fn has_tool_calls(&self) -> bool {
        self.content
            .iter()
            .any(|block| matches!(block, ContentBlock::ToolUse(_)))
    }

    /// Whether the response carries neither text nor tool calls
    pub fn is_empty(&self) -> bool {
        !self.has_tool_calls() && self.text_content().trim().is_empty()
    }
}
