//! Triage prompts

/// Prompt templates for the triage classifier
pub struct TriagePromptTemplate;

impl TriagePromptTemplate {
    /// System prompt for the triage completion
    pub fn system() -> &'static str {
        r#"You are a Triage Officer. Classify the user's request.

**Simple** requests can be answered immediately without tools:
- Casual conversation and greetings
- Factual questions answerable from general knowledge
- Clarifications about the ongoing conversation

**Complex** requests need tools or multiple steps:
- File reading or writing
- Web or browser access
- Multi-step reasoning or research
- Writing or analyzing code

Respond with a single JSON object:
{
  "isComplex": boolean,
  "reasoning": "one sentence explaining the classification",
  "directResponse": "the full answer, ONLY when isComplex is false"
}

Output only the JSON object, nothing else."#
    }

    /// User prompt for the triage completion
    pub fn request(request: &str, context: &str) -> String {
        format!(
            "User Request: {}\n\nContext Summary:\n{}\n\nAnalyze the complexity.",
            request, context
        )
    }
}
