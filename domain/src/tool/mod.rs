//! Tool catalog, invocation, and provider abstractions

pub mod entities;
pub mod provider;
pub mod value_objects;

pub use entities::{ToolCall, ToolDescriptor};
pub use provider::{NativeTool, ProviderError, ToolProvider};
pub use value_objects::{ToolError, ToolResult};
