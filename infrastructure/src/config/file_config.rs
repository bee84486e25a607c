//! Typed configuration file schema

use serde::{Deserialize, Serialize};
use taskforce_domain::ModelParams;

/// `[model]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSection {
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    /// Estimated-token budget that triggers history compression
    pub input_budget: Option<usize>,
    pub reasoning: bool,
}

impl Default for ModelSection {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            temperature: 0.7,
            max_output_tokens: 4096,
            input_budget: None,
            reasoning: false,
        }
    }
}

/// `[agent]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSection {
    /// Structured tool calls when true, legacy JSON-in-text otherwise
    pub native_tool_calling: bool,
}

impl Default for AgentSection {
    fn default() -> Self {
        Self {
            native_tool_calling: true,
        }
    }
}

/// `[mission]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionSection {
    /// How many recent task outputs flow into the next task input
    pub context_window: usize,
    /// Retry budget for direct tool tasks
    pub max_retries: u32,
}

impl Default for MissionSection {
    fn default() -> Self {
        Self {
            context_window: 3,
            max_retries: 3,
        }
    }
}

/// `[workspace]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceSection {
    /// Directory for durable task progress files
    pub progress_dir: String,
}

impl Default for WorkspaceSection {
    fn default() -> Self {
        Self {
            progress_dir: "agents-progress".to_string(),
        }
    }
}

/// Full configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub model: ModelSection,
    pub agent: AgentSection,
    pub mission: MissionSection,
    pub workspace: WorkspaceSection,
}

impl FileConfig {
    /// Model parameters assembled from the `[model]` and `[agent]`
    /// sections.
    pub fn model_params(&self) -> ModelParams {
        let mut params = ModelParams::new(&self.model.model)
            .with_temperature(self.model.temperature)
            .with_max_output_tokens(self.model.max_output_tokens)
            .with_native_tool_calling(self.agent.native_tool_calling)
            .with_reasoning(self.model.reasoning);
        if let Some(budget) = self.model.input_budget {
            params = params.with_input_budget(budget);
        }
        params
    }
}
