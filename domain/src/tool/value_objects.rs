//! Tool invocation results and errors

use serde::{Deserialize, Serialize};

/// Machine-readable error code for tool failures
pub mod error_code {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const NOT_PERMITTED: &str = "NOT_PERMITTED";
    pub const EXECUTION_FAILED: &str = "EXECUTION_FAILED";
    pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
}

/// A structured tool error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolError {
    /// One of the codes in [`error_code`]
    pub code: String,
    /// Human-readable message
    pub message: String,
}

impl ToolError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(error_code::NOT_FOUND, message)
    }

    pub fn not_permitted(message: impl Into<String>) -> Self {
        Self::new(error_code::NOT_PERMITTED, message)
    }

    pub fn execution_failed(message: impl Into<String>) -> Self {
        Self::new(error_code::EXECUTION_FAILED, message)
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(error_code::INVALID_ARGUMENT, message)
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// The outcome of one tool invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Tool that was invoked
    pub tool_name: String,
    /// Whether the invocation succeeded
    pub success: bool,
    /// Output text on success
    pub output: Option<String>,
    /// Structured error on failure
    pub error: Option<ToolError>,
}

impl ToolResult {
    pub fn success(tool_name: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: true,
            output: Some(output.into()),
            error: None,
        }
    }

    pub fn failure(tool_name: impl Into<String>, error: ToolError) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: false,
            output: None,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Render the result as an observation for the agent loop.
    ///
    /// Failures are prefixed with `Error:` so the model can react to
    /// them without the loop aborting.
    pub fn observation(&self) -> String {
        if self.success {
            self.output.clone().unwrap_or_default()
        } else {
            let message = self
                .error
                .as_ref()
                .map(|e| e.message.clone())
                .unwrap_or_else(|| "unknown tool failure".to_string());
            format!("Error: {}", message)
        }
    }
}
