//! Structured completion output

pub mod response;

pub use response::{CompletionResponse, ContentBlock, StopReason, ToolUse};
