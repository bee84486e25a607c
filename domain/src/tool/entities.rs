//! Tool entities

use serde::{Deserialize, Serialize};

/// A tool advertised in the merged catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Unique name within the catalog
    pub name: String,
    /// Human-readable description shown to the model
    pub description: String,
    /// JSON schema of the input object
    pub input_schema: serde_json::Value,
}

impl ToolDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: serde_json::json!({"type": "object", "properties": {}}),
        }
    }

    pub fn with_input_schema(mut self, schema: serde_json::Value) -> Self {
        self.input_schema = schema;
        self
    }

    /// One catalog line as shown in planning prompts
    pub fn prompt_line(&self) -> String {
        format!("- {}: {}", self.name, self.description)
    }
}

/// A tool invocation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Tool name to invoke
    pub tool_name: String,
    /// Arguments as a JSON object
    pub arguments: serde_json::Value,
    /// Correlation id when the call originated from a native tool-use block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_id: Option<String>,
}

impl ToolCall {
    pub fn new(tool_name: impl Into<String>, arguments: serde_json::Value) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments,
            call_id: None,
        }
    }

    pub fn with_call_id(mut self, call_id: impl Into<String>) -> Self {
        self.call_id = Some(call_id.into());
        self
    }

    /// Fetch a string argument
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(|v| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prompt_line_format() {
        let descriptor = ToolDescriptor::new("web_search", "Search the web.");
        assert_eq!(descriptor.prompt_line(), "- web_search: Search the web.");
    }

    #[test]
    fn test_get_string_argument() {
        let call = ToolCall::new("read_file", json!({"path": "/tmp/x", "n": 3}));
        assert_eq!(call.get_string("path"), Some("/tmp/x"));
        assert_eq!(call.get_string("n"), None);
        assert_eq!(call.get_string("missing"), None);
    }

    #[test]
    fn test_call_id_builder() {
        let call = ToolCall::new("x", json!({})).with_call_id("t1");
        assert_eq!(call.call_id.as_deref(), Some("t1"));
    }
}
