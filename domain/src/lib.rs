//! Domain layer for taskforce
//!
//! Pure business entities and logic: conversation state, turn decoding,
//! mission plans and their parsers, tool abstractions, and prompt
//! templates. This crate has no I/O and no async runtime dependency
//! beyond trait definitions.

pub mod agent;
pub mod completion;
pub mod core;
pub mod mission;
pub mod prompt;
pub mod tool;
pub mod util;

// Re-export commonly used types
pub use agent::{
    AgentDefinition, AgentStatus, ConversationState, DecodedTurn, JsonTurnDecoder, Message,
    ModelParams, NativeTurnDecoder, Role, TurnDecoder,
};
pub use completion::{CompletionResponse, ContentBlock, StopReason, ToolUse};
pub use crate::core::tokens::estimate_tokens;
pub use mission::{
    MissionPlan, MissionSnapshot, PlanParseError, RosterMember, Stage, StageSnapshot, Task,
    TaskSnapshot, TaskStatus, TriageParseError, TriageVerdict, parse_mission_plan,
    parse_triage_verdict,
};
pub use prompt::{MissionPromptTemplate, SystemPromptBuilder, TriagePromptTemplate};
pub use tool::{
    NativeTool, ProviderError, ToolCall, ToolDescriptor, ToolError, ToolProvider, ToolResult,
};
