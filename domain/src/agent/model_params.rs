//! Model invocation parameters

use serde::{Deserialize, Serialize};

/// Parameters for a completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelParams {
    /// Model identifier understood by the gateway
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Output token limit
    pub max_output_tokens: u32,
    /// Input token budget that triggers history compression when exceeded
    pub input_budget: Option<usize>,
    /// Whether the model supports structured tool calls
    pub native_tool_calling: bool,
    /// Reasoning models prefer free-text output; the tool catalog is
    /// not attached to their requests
    pub reasoning: bool,
}

impl ModelParams {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    pub fn with_input_budget(mut self, input_budget: usize) -> Self {
        self.input_budget = Some(input_budget);
        self
    }

    pub fn with_native_tool_calling(mut self, enabled: bool) -> Self {
        self.native_tool_calling = enabled;
        self
    }

    pub fn with_reasoning(mut self, reasoning: bool) -> Self {
        self.reasoning = reasoning;
        self
    }
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            temperature: 0.7,
            max_output_tokens: 4096,
            input_budget: None,
            native_tool_calling: true,
            reasoning: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let params = ModelParams::new("test-model")
            .with_temperature(0.2)
            .with_max_output_tokens(1024)
            .with_input_budget(8000)
            .with_native_tool_calling(false)
            .with_reasoning(true);

        assert_eq!(params.model, "test-model");
        assert_eq!(params.temperature, 0.2);
        assert_eq!(params.max_output_tokens, 1024);
        assert_eq!(params.input_budget, Some(8000));
        assert!(!params.native_tool_calling);
        assert!(params.reasoning);
    }

    #[test]
    fn test_default_has_no_input_budget() {
        let params = ModelParams::default();
        assert!(params.input_budget.is_none());
        assert!(params.native_tool_calling);
    }
}
