//! Agent system prompt assembly
//!
//! [`SystemPromptBuilder`] assembles the system prompt for a reasoning
//! agent from optional sections. Only the identity section is always
//! present; the rest appear when configured.

use crate::tool::entities::ToolDescriptor;

/// Instructions for the legacy JSON-in-text tool protocol
const LEGACY_TOOLING_INSTRUCTIONS: &str = r#"To use a tool, respond with a single JSON object:
{"thought": "why this step", "action": "tool_name", "args": {...}}

When the task is done, respond with:
{"thought": "Task completed.", "action": "final_answer", "args": {"text": "your final answer"}}

Output exactly one JSON object per response."#;

/// Builds an agent system prompt from sections
#[derive(Debug, Clone, Default)]
pub struct SystemPromptBuilder {
    name: String,
    role: String,
    persona: Option<String>,
    environment: Option<String>,
    tools: Vec<ToolDescriptor>,
    legacy_tooling: bool,
    memory_context: Option<String>,
    rules: Vec<String>,
}

impl SystemPromptBuilder {
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            ..Default::default()
        }
    }

    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        let persona = persona.into();
        if !persona.trim().is_empty() {
            self.persona = Some(persona);
        }
        self
    }

    /// Environment description (working directory, date, platform)
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    pub fn with_tools(mut self, tools: Vec<ToolDescriptor>) -> Self {
        self.tools = tools;
        self
    }

    /// Emit JSON action-format instructions instead of relying on
    /// native tool calls
    pub fn with_legacy_tooling(mut self, enabled: bool) -> Self {
        self.legacy_tooling = enabled;
        self
    }

    /// Context retrieved from long-term memory
    pub fn with_memory_context(mut self, context: impl Into<String>) -> Self {
        let context = context.into();
        if !context.trim().is_empty() {
            self.memory_context = Some(context);
        }
        self
    }

    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rules.push(rule.into());
        self
    }

    pub fn build(&self) -> String {
        let mut sections = Vec::new();

        let mut identity = format!("You are {}, a {} agent.", self.name, self.role);
        if let Some(persona) = &self.persona {
            identity.push_str(&format!("\n{}", persona));
        }
        sections.push(identity);

        if let Some(environment) = &self.environment {
            sections.push(format!("# Environment\n{}", environment));
        }

        if !self.tools.is_empty() {
            let catalog = self
                .tools
                .iter()
                .map(|t| t.prompt_line())
                .collect::<Vec<_>>()
                .join("\n");
            let mut section = format!("# Available Tools\n{}", catalog);
            if self.legacy_tooling {
                section.push_str(&format!("\n\n{}", LEGACY_TOOLING_INSTRUCTIONS));
            }
            sections.push(section);
        }

        if let Some(context) = &self.memory_context {
            sections.push(format!(
                "# Relevant Context (Retrieved from Memory)\n{}",
                context
            ));
        }

        if !self.rules.is_empty() {
            let rules = self
                .rules
                .iter()
                .map(|r| format!("- {}", r))
                .collect::<Vec<_>>()
                .join("\n");
            sections.push(format!("# Operational Rules\n{}", rules));
        }

        sections.join("\n\n")
    }
}
