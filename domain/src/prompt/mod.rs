//! Prompt templates

pub mod agent;
pub mod mission;
pub mod triage;

pub use agent::SystemPromptBuilder;
pub use mission::MissionPromptTemplate;
pub use triage::TriagePromptTemplate;
