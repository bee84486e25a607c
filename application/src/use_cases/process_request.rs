//! Top-level request flow
//!
//! Triage decides the path: simple requests return the triage direct
//! response unchanged; complex requests run a full mission, then an
//! output agent turns the aggregated task outputs into the final
//! user-facing text, streamed through the progress notifier. The
//! request and response are written to long-term memory best-effort.

use crate::ports::completion_gateway::{ChunkHandler, CompletionGateway};
use crate::ports::memory::{MemoryEntry, MemoryPort, NullMemory};
use crate::ports::progress::MissionProgressNotifier;
use crate::use_cases::run_agent::{AgentError, ReasoningAgent};
use crate::use_cases::run_mission::{MissionError, MissionOrchestrator};
use crate::use_cases::triage::TriageClassifier;
use crate::ToolDispatcher;
use std::sync::Arc;
use taskforce_domain::{AgentDefinition, ModelParams, SystemPromptBuilder};
use thiserror::Error;
use tracing::{info, warn};

/// Errors that abort request processing
#[derive(Debug, Error)]
pub enum ProcessRequestError {
    #[error(transparent)]
    Mission(#[from] MissionError),

    #[error("Response formatting failed: {0}")]
    Formatting(#[from] AgentError),
}

/// Routes one request through triage, mission, and output formatting
pub struct ProcessRequestUseCase {
    triage: TriageClassifier,
    orchestrator: MissionOrchestrator,
    gateway: Arc<dyn CompletionGateway>,
    memory: Arc<dyn MemoryPort>,
    params: ModelParams,
    session_id: String,
}

impl ProcessRequestUseCase {
    pub fn new(
        triage: TriageClassifier,
        orchestrator: MissionOrchestrator,
        gateway: Arc<dyn CompletionGateway>,
    ) -> Self {
        Self {
            triage,
            orchestrator,
            gateway,
            memory: Arc::new(NullMemory),
            params: ModelParams::default(),
            session_id: "default".to_string(),
        }
    }

    pub fn with_memory(mut self, memory: Arc<dyn MemoryPort>) -> Self {
        self.memory = memory;
        self
    }

    pub fn with_params(mut self, params: ModelParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    /// Handle one user request end to end.
    pub async fn respond(
        &self,
        request: &str,
        context: &str,
        notifier: Arc<dyn MissionProgressNotifier>,
    ) -> Result<String, ProcessRequestError> {
        self.remember(request, "request").await;

        let verdict = self.triage.evaluate(request, context).await;
        if !verdict.is_complex {
            if let Some(response) = verdict.direct_response {
                info!("Triage: simple request, responding directly");
                notifier.on_response_chunk(&response);
                self.remember(&response, "response").await;
                return Ok(response);
            }
        }

        info!("Triage: complex request, starting mission");
        let mission_result = self
            .orchestrator
            .execute(request, context, Arc::clone(&notifier))
            .await?;

        let response = self.format_response(request, &mission_result, &notifier).await?;
        self.remember(&response, "response").await;
        Ok(response)
    }

    /// Turn aggregated mission output into the final user-facing text.
    async fn format_response(
        &self,
        request: &str,
        mission_result: &str,
        notifier: &Arc<dyn MissionProgressNotifier>,
    ) -> Result<String, ProcessRequestError> {
        let system_prompt = SystemPromptBuilder::new("Output", "response formatting")
            .with_persona(
                "You turn raw mission results into a clear, complete answer for the user. \
                 Preserve every concrete result; drop internal chatter.",
            )
            .build();

        let definition = AgentDefinition::new("Output", "response formatting")
            .with_params(self.params.clone());
        let mut agent = ReasoningAgent::new(
            definition,
            Arc::clone(&self.gateway),
            Arc::new(ToolDispatcher::new()),
            system_prompt,
        );

        let input = format!(
            "Original request:\n{}\n\nMission results:\n{}\n\nFormulate the final response to the user.",
            request, mission_result
        );

        let notifier = Arc::clone(notifier);
        let on_chunk: ChunkHandler = Arc::new(move |chunk: &str| {
            notifier.on_response_chunk(chunk);
        });

        Ok(agent.process(&input, Some(on_chunk), None).await?)
    }

    async fn remember(&self, content: &str, tag: &str) {
        let entry = MemoryEntry::new(content)
            .with_tags(vec![tag.to_string()])
            .with_session_id(&self.session_id);
        if let Err(e) = self.memory.write(entry).await {
            warn!("Memory write failed: {}", e);
        }
    }
}
