//! Agent entities
//!
//! [`AgentDefinition`] is the immutable identity of a reasoning agent:
//! who it is, which model it runs on, and which tools it may use.
//! [`ConversationState`] is the mutable history the agent owns while
//! processing a task. The two are kept separate so one definition can
//! back several sequential conversations.

use crate::agent::model_params::ModelParams;
use crate::completion::response::ToolUse;
use crate::core::tokens::estimate_tokens;
use serde::{Deserialize, Serialize};

/// Message author role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// A single message in a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// Native tool calls carried by an assistant message
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolUse>,
    /// Correlation id on a tool-role result message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    /// Assistant message carrying native tool calls
    pub fn assistant_with_calls(content: impl Into<String>, tool_calls: Vec<ToolUse>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            tool_calls,
            tool_call_id: None,
        }
    }

    /// Tool result message correlated to a native call
    pub fn tool_result(call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Role::Tool,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: Some(call_id.into()),
        }
    }
}

/// Lifecycle status of an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    #[default]
    Idle,
    Thinking,
    Acting,
    Failed,
}

/// Immutable identity of a reasoning agent
#[derive(Debug, Clone)]
pub struct AgentDefinition {
    /// Unique name within a mission roster
    pub name: String,
    /// Short role label (e.g. "Researcher")
    pub role: String,
    /// Persona text woven into the system prompt
    pub persona: String,
    /// Model invocation parameters
    pub params: ModelParams,
    /// Tools this agent may invoke; empty means none
    pub allowed_tools: Vec<String>,
}

impl AgentDefinition {
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            persona: String::new(),
            params: ModelParams::default(),
            allowed_tools: Vec::new(),
        }
    }

    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = persona.into();
        self
    }

    pub fn with_params(mut self, params: ModelParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_allowed_tools(mut self, tools: Vec<String>) -> Self {
        self.allowed_tools = tools;
        self
    }

    /// Whether this agent may invoke the named tool
    pub fn is_tool_allowed(&self, name: &str) -> bool {
        self.allowed_tools.iter().any(|t| t == name)
    }
}

/// Mutable conversation history owned by one agent
#[derive(Debug, Clone, Default)]
pub struct ConversationState {
    messages: Vec<Message>,
    status: AgentStatus,
}

impl ConversationState {
    /// Start a conversation seeded with a system prompt
    pub fn with_system_prompt(prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(prompt)],
            status: AgentStatus::Idle,
        }
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn status(&self) -> AgentStatus {
        self.status
    }

    pub fn set_status(&mut self, status: AgentStatus) {
        self.status = status;
    }

    /// Estimated token weight of the whole history
    pub fn estimated_tokens(&self) -> usize {
        self.messages
            .iter()
            .map(|m| estimate_tokens(&m.content))
            .sum()
    }

    /// Whether the history is eligible for compression: over the given
    /// budget and long enough that a middle span exists to summarize.
    pub fn needs_compression(&self, input_budget: usize) -> bool {
        self.estimated_tokens() > input_budget && self.messages.len() > 3
    }

    /// Messages between the system prompt and the two most recent
    /// entries, rendered for the summarizer.
    pub fn compressible_span(&self) -> String {
        let end = self.messages.len().saturating_sub(2);
        self.messages[1..end]
            .iter()
            .map(|m| format!("{:?}: {}", m.role, m.content))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Replace the compressible span with a single summary message,
    /// keeping the system prompt and the last two messages.
    pub fn apply_summary(&mut self, summary: &str) {
        let end = self.messages.len().saturating_sub(2);
        if end <= 1 {
            return;
        }
        let summary_message =
            Message::system(format!("[Previous Context Summary]: {}", summary));
        self.messages.splice(1..end, [summary_message]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_tool_allowlist() {
        let agent = AgentDefinition::new("Scout", "Researcher")
            .with_allowed_tools(vec!["web_search".to_string()]);

        assert!(agent.is_tool_allowed("web_search"));
        assert!(!agent.is_tool_allowed("write_file"));
    }

    #[test]
    fn test_conversation_starts_with_system_prompt() {
        let state = ConversationState::with_system_prompt("You are a test agent.");
        assert_eq!(state.len(), 1);
        assert_eq!(state.messages()[0].role, Role::System);
        assert_eq!(state.status(), AgentStatus::Idle);
    }

    #[test]
    fn test_needs_compression_requires_both_conditions() {
        let mut state = ConversationState::with_system_prompt("sys");
        state.push(Message::user("aaaa"));
        state.push(Message::assistant("bbbb"));

        // Over budget but only 3 messages
        assert!(!state.needs_compression(1));

        state.push(Message::user("cccc"));
        // 4 messages, over budget
        assert!(state.needs_compression(1));
        // 4 messages, under budget
        assert!(!state.needs_compression(10_000));
    }

    #[test]
    fn test_apply_summary_keeps_ends() {
        let mut state = ConversationState::with_system_prompt("sys");
        state.push(Message::user("one"));
        state.push(Message::assistant("two"));
        state.push(Message::user("three"));
        state.push(Message::assistant("four"));

        state.apply_summary("the middle happened");

        assert_eq!(state.len(), 4); // sys + summary + last two
        assert_eq!(state.messages()[0].content, "sys");
        assert!(
            state.messages()[1]
                .content
                .starts_with("[Previous Context Summary]:")
        );
        assert_eq!(state.messages()[2].content, "three");
        assert_eq!(state.messages()[3].content, "four");
    }

    #[test]
    fn test_apply_summary_noop_on_short_history() {
        let mut state = ConversationState::with_system_prompt("sys");
        state.push(Message::user("one"));
        state.push(Message::assistant("two"));

        state.apply_summary("summary");
        assert_eq!(state.len(), 3);
        assert_eq!(state.messages()[1].content, "one");
    }

    #[test]
    fn test_compressible_span_excludes_ends() {
        let mut state = ConversationState::with_system_prompt("sys");
        state.push(Message::user("one"));
        state.push(Message::assistant("two"));
        state.push(Message::user("three"));
        state.push(Message::assistant("four"));

        let span = state.compressible_span();
        assert!(span.contains("one"));
        assert!(span.contains("two"));
        assert!(!span.contains("sys"));
        assert!(!span.contains("three"));
        assert!(!span.contains("four"));
    }

    #[test]
    fn test_estimated_tokens_sums_messages() {
        let mut state = ConversationState::default();
        state.push(Message::user("abcd")); // 2 tokens
        state.push(Message::assistant("ab")); // 1 token
        assert_eq!(state.estimated_tokens(), 3);
    }
}
