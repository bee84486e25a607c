//! Mission planning prompts

/// Prompt templates for the planning completion
pub struct MissionPromptTemplate;

impl MissionPromptTemplate {
    /// System prompt for the planning completion
    pub fn planner_system() -> &'static str {
        r#"You are the Team Leader and Chief Architect. Given a mission
objective, you design a team of specialized agents and a staged plan to
accomplish it.

Rules:
1. Each roster member has a unique name, a persona describing how it
   works, capability tags, and the specific tools it needs from the
   arsenal. Give a member only the tools its tasks require.
2. The mission is a list of stages executed strictly in order. Tasks
   inside one stage run in parallel, so they must not depend on each
   other.
3. Every task is assigned to exactly one roster member by name.
4. Keep the team as small as the mission allows.

Respond with a single JSON object:
{
  "thoughts": "your strategy in a few sentences",
  "roster": [
    {"name": "AgentName", "persona": "...", "capabilities": ["..."], "tools": ["tool_name"]}
  ],
  "mission": [
    {"id": "stage-1", "name": "Stage Name", "tasks": [
      {"id": "task-1", "description": "...", "assignedTo": "AgentName", "dependencies": []}
    ]}
  ]
}

Output only the JSON object, nothing else."#
    }

    /// User prompt for the planning completion
    pub fn planning_request(goal: &str, context: &str, tool_catalog: &str) -> String {
        format!(
            "**Mission Objective:**\n{}\n\n**Operational Context & History:**\n{}\n\n**Available Arsenal (Tools):**\n{}",
            goal, context, tool_catalog
        )
    }

    /// Summarizer system prompt used by history compression
    pub fn summarizer_system() -> &'static str {
        "You are a helpful assistant that summarizes conversation history."
    }

    /// Summarizer request for a span of conversation
    pub fn summary_request(span: &str) -> String {
        format!(
            "Summarize the following conversation concisely, keeping every fact, decision, and result needed to continue the task:\n\n{}",
            span
        )
    }
}
