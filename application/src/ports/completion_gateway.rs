//! Completion gateway port
//!
//! The gateway hides the model provider behind one async call. Streaming
//! is exposed through an optional chunk handler; the gateway still
//! returns the fully accumulated response when streaming is used.

use async_trait::async_trait;
use std::sync::Arc;
use taskforce_domain::{CompletionResponse, Message, ModelParams, ToolDescriptor};
use thiserror::Error;

/// Errors raised by the completion gateway
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Model '{0}' not available")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Response stream interrupted: {0}")]
    StreamInterrupted(String),

    #[error("Request timed out")]
    Timeout,
}

/// Callback invoked with each streamed text chunk
pub type ChunkHandler = Arc<dyn Fn(&str) + Send + Sync>;

/// One completion request
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub messages: Vec<Message>,
    pub params: ModelParams,
    /// Ask the provider for a JSON object response
    pub json_mode: bool,
    /// Tool catalog attached to the request; empty disables tool use
    pub tools: Vec<ToolDescriptor>,
}

impl CompletionRequest {
    pub fn new(messages: Vec<Message>, params: ModelParams) -> Self {
        Self {
            messages,
            params,
            json_mode: false,
            tools: Vec::new(),
        }
    }

    pub fn json_mode(mut self) -> Self {
        self.json_mode = true;
        self
    }

    pub fn with_tools(mut self, tools: Vec<ToolDescriptor>) -> Self {
        self.tools = tools;
        self
    }
}

/// Port to the model provider
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Run one completion. When `on_chunk` is given the gateway streams
    /// text through it and still returns the accumulated response.
    async fn complete(
        &self,
        request: CompletionRequest,
        on_chunk: Option<ChunkHandler>,
    ) -> Result<CompletionResponse, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskforce_domain::Message;

    #[test]
    fn test_request_builder() {
        let request = CompletionRequest::new(vec![Message::user("hi")], ModelParams::default())
            .json_mode()
            .with_tools(vec![ToolDescriptor::new("t", "d")]);

        assert!(request.json_mode);
        assert_eq!(request.tools.len(), 1);
        assert_eq!(request.messages.len(), 1);
    }

    #[test]
    fn test_request_defaults() {
        let request = CompletionRequest::new(vec![], ModelParams::default());
        assert!(!request.json_mode);
        assert!(request.tools.is_empty());
    }
}
