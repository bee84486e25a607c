//! Tool provider abstractions
//!
//! [`NativeTool`] is an in-process tool implementation. [`ToolProvider`]
//! is an external source of tools (typically another process speaking a
//! tool protocol). The dispatcher merges both into one catalog, natives
//! first.

use crate::tool::entities::{ToolCall, ToolDescriptor};
use crate::tool::value_objects::ToolResult;
use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by an external tool provider
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Tool '{0}' not found on provider")]
    ToolNotFound(String),

    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    #[error("Tool execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Protocol error: {0}")]
    Protocol(String),
}

/// An in-process tool implementation
#[async_trait]
pub trait NativeTool: Send + Sync {
    /// Catalog entry for this tool
    fn descriptor(&self) -> ToolDescriptor;

    /// Invoke the tool with a JSON argument object
    async fn invoke(&self, arguments: &serde_json::Value) -> ToolResult;
}

/// An external source of tools
#[async_trait]
pub trait ToolProvider: Send + Sync {
    /// Stable identifier (e.g. the provider process name)
    fn id(&self) -> &str;

    /// List the tools this provider currently advertises
    async fn discover_tools(&self) -> Result<Vec<ToolDescriptor>, ProviderError>;

    /// Execute a tool call on this provider
    async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ProviderError>;

    /// Whether the provider advertises the named tool
    async fn has_tool(&self, name: &str) -> bool {
        match self.discover_tools().await {
            Ok(tools) => tools.iter().any(|t| t.name == name),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::value_objects::ToolError;
    use serde_json::json;

    struct MockProvider {
        tools: Vec<ToolDescriptor>,
    }

    #[async_trait]
    impl ToolProvider for MockProvider {
        fn id(&self) -> &str {
            "mock"
        }

        async fn discover_tools(&self) -> Result<Vec<ToolDescriptor>, ProviderError> {
            Ok(self.tools.clone())
        }

        async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ProviderError> {
            if self.tools.iter().any(|t| t.name == call.tool_name) {
                Ok(ToolResult::success(&call.tool_name, "ok"))
            } else {
                Err(ProviderError::ToolNotFound(call.tool_name.clone()))
            }
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl ToolProvider for FailingProvider {
        fn id(&self) -> &str {
            "failing"
        }

        async fn discover_tools(&self) -> Result<Vec<ToolDescriptor>, ProviderError> {
            Err(ProviderError::Unavailable("connection lost".to_string()))
        }

        async fn execute(&self, _call: &ToolCall) -> Result<ToolResult, ProviderError> {
            Err(ProviderError::Unavailable("connection lost".to_string()))
        }
    }

    #[tokio::test]
    async fn test_has_tool_default_impl() {
        let provider = MockProvider {
            tools: vec![ToolDescriptor::new("web_search", "Search the web.")],
        };
        assert!(provider.has_tool("web_search").await);
        assert!(!provider.has_tool("missing").await);
    }

    #[tokio::test]
    async fn test_has_tool_false_when_discovery_fails() {
        assert!(!FailingProvider.has_tool("anything").await);
    }

    #[tokio::test]
    async fn test_mock_provider_execute() {
        let provider = MockProvider {
            tools: vec![ToolDescriptor::new("echo", "Echo.")],
        };
        let result = provider
            .execute(&ToolCall::new("echo", json!({})))
            .await
            .unwrap();
        assert!(result.is_success());

        let err = provider
            .execute(&ToolCall::new("missing", json!({})))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::ToolNotFound(_)));
    }

    #[test]
    fn test_tool_error_from_provider_error_message() {
        let err = ProviderError::ExecutionFailed("boom".to_string());
        let tool_err = ToolError::execution_failed(err.to_string());
        assert!(tool_err.message.contains("boom"));
    }
}
