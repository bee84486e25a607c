//! Application layer for taskforce
//!
//! This crate contains use cases and port definitions. It depends only
//! on the domain layer.

pub mod dispatcher;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use dispatcher::ToolDispatcher;
pub use ports::{
    completion_gateway::{ChunkHandler, CompletionGateway, CompletionRequest, GatewayError},
    memory::{MemoryEntry, MemoryError, MemoryPort, NullMemory},
    progress::{MissionProgressNotifier, NoProgress},
    progress_store::{NullProgressStore, ProgressStore, StoreError, TaskProgressRecord},
};
pub use use_cases::execute_tool_task::{ExecuteToolTaskUseCase, ToolTaskError};
pub use use_cases::process_request::{ProcessRequestError, ProcessRequestUseCase};
pub use use_cases::run_agent::{AgentError, ReasoningAgent, StepHandler, TraceStep, MAX_STEPS};
pub use use_cases::run_mission::{MissionError, MissionOrchestrator};
pub use use_cases::triage::TriageClassifier;
