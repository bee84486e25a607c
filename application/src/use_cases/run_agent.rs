//! Reasoning agent loop
//!
//! [`ReasoningAgent`] owns one conversation and runs a bounded
//! reason-act loop: request a completion, decode the turn, execute tool
//! actions through the dispatcher, feed observations back, and repeat
//! until a final answer or the step bound.
//!
//! Tool failures are observations, not errors; the model sees
//! `Error: ...` and may recover. Only an empty response, a disallowed
//! tool, a gateway failure, or cancellation abort the loop.

use crate::dispatcher::ToolDispatcher;
use crate::ports::completion_gateway::{
    ChunkHandler, CompletionGateway, CompletionRequest, GatewayError,
};
use crate::use_cases::shared::check_cancelled;
use std::sync::Arc;
use taskforce_domain::{
    AgentDefinition, AgentStatus, ConversationState, DecodedTurn, JsonTurnDecoder, Message,
    MissionPromptTemplate, NativeTurnDecoder, ToolUse, TurnDecoder,
};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Upper bound on reason-act iterations per task
pub const MAX_STEPS: usize = 10;

/// Returned when the step bound is hit without a final answer
const EXHAUSTED_ANSWER: &str = "I was unable to complete the task within the allotted steps.";

/// Returned when the model declines the task
const REFUSAL_ANSWER: &str = "I'm sorry, but I can't help with that request.";

/// Errors that abort an agent turn
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Tool '{0}' is not permitted for this agent")]
    ToolNotPermitted(String),

    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Agent cancelled")]
    Cancelled,
}

/// One recorded reason-act step
#[derive(Debug, Clone)]
pub struct TraceStep {
    pub thought: String,
    pub action: String,
    pub observation: Option<String>,
}

/// Callback invoked after each recorded step
pub type StepHandler = Arc<dyn Fn(&TraceStep) + Send + Sync>;

/// A single conversational actor bound to one definition
pub struct ReasoningAgent {
    definition: AgentDefinition,
    gateway: Arc<dyn CompletionGateway>,
    dispatcher: Arc<ToolDispatcher>,
    decoder: Box<dyn TurnDecoder>,
    state: ConversationState,
    trace: Vec<TraceStep>,
    cancellation: Option<CancellationToken>,
}

impl ReasoningAgent {
    /// Create an agent with an assembled system prompt.
    ///
    /// The turn decoder follows the model parameters: native tool
    /// calling uses structured tool-use blocks, otherwise the legacy
    /// JSON-in-text protocol.
    pub fn new(
        definition: AgentDefinition,
        gateway: Arc<dyn CompletionGateway>,
        dispatcher: Arc<ToolDispatcher>,
        system_prompt: impl Into<String>,
    ) -> Self {
        let decoder: Box<dyn TurnDecoder> = if definition.params.native_tool_calling {
            Box::new(NativeTurnDecoder)
        } else {
            Box::new(JsonTurnDecoder)
        };

        Self {
            definition,
            gateway,
            dispatcher,
            decoder,
            state: ConversationState::with_system_prompt(system_prompt),
            trace: Vec::new(),
            cancellation: None,
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn status(&self) -> AgentStatus {
        self.state.status()
    }

    /// The thought/action/observation trace of the last `process` call,
    /// rendered as markdown.
    pub fn execution_trace(&self) -> String {
        self.trace
            .iter()
            .map(|step| {
                let mut block = format!("**Thought**: {}\n**Action**: {}", step.thought, step.action);
                if let Some(observation) = &step.observation {
                    block.push_str(&format!("\n**Observation**: {}", observation));
                }
                block
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Process one task input and return the final answer text.
    pub async fn process(
        &mut self,
        input: &str,
        on_chunk: Option<ChunkHandler>,
        on_step: Option<StepHandler>,
    ) -> Result<String, AgentError> {
        self.trace.clear();
        self.state.push(Message::user(input));

        let mut last_answer: Option<String> = None;

        for step in 0..MAX_STEPS {
            check_cancelled(&self.cancellation).map_err(|_| AgentError::Cancelled)?;
            self.compress_history_if_needed().await;
            self.state.set_status(AgentStatus::Thinking);

            let tools = if self.definition.params.reasoning {
                Vec::new()
            } else {
                self.dispatcher
                    .catalog_for(&self.definition.allowed_tools)
                    .await
            };

            let request = CompletionRequest::new(
                self.state.messages().to_vec(),
                self.definition.params.clone(),
            )
            .with_tools(tools);

            let response = match self.gateway.complete(request, on_chunk.clone()).await {
                Ok(response) => response,
                Err(e) => {
                    self.state.set_status(AgentStatus::Failed);
                    return Err(e.into());
                }
            };

            debug!(
                agent = %self.definition.name,
                step,
                "Decoded turn from {}",
                response.model
            );

            match self.decoder.decode(&response) {
                DecodedTurn::Empty => {
                    self.state.set_status(AgentStatus::Failed);
                    return Err(AgentError::EmptyResponse);
                }
                DecodedTurn::Refusal => {
                    self.state.set_status(AgentStatus::Idle);
                    return Ok(REFUSAL_ANSWER.to_string());
                }
                DecodedTurn::FinalAnswer(text) => {
                    self.record_step(
                        TraceStep {
                            thought: text.clone(),
                            action: "final_answer".to_string(),
                            observation: None,
                        },
                        &on_step,
                    );
                    self.state.push(Message::assistant(&text));
                    self.state.set_status(AgentStatus::Idle);
                    return Ok(text);
                }
                DecodedTurn::ToolRequests(calls) => {
                    let text = response.text_content();
                    if !text.trim().is_empty() {
                        last_answer = Some(text.clone());
                    }
                    self.state
                        .push(Message::assistant_with_calls(&text, calls.clone()));
                    self.run_native_calls(&text, calls, &on_step).await?;
                }
                DecodedTurn::Action {
                    thought,
                    tool,
                    args,
                } => {
                    self.state.push(Message::assistant(response.text_content()));
                    let observation = self.run_legacy_action(&thought, &tool, args, &on_step).await?;
                    self.state
                        .push(Message::user(format!("Observation: {}", observation)));
                }
            }
        }

        self.state.set_status(AgentStatus::Idle);
        Ok(last_answer.unwrap_or_else(|| EXHAUSTED_ANSWER.to_string()))
    }

    /// Execute native tool calls in order and append one tool result
    /// message per call.
    async fn run_native_calls(
        &mut self,
        thought: &str,
        calls: Vec<ToolUse>,
        on_step: &Option<StepHandler>,
    ) -> Result<(), AgentError> {
        self.state.set_status(AgentStatus::Acting);

        for call in calls {
            check_cancelled(&self.cancellation).map_err(|_| AgentError::Cancelled)?;
            if !self.definition.is_tool_allowed(&call.name) {
                self.state.set_status(AgentStatus::Failed);
                return Err(AgentError::ToolNotPermitted(call.name));
            }

            let result = self.dispatcher.invoke(&call.name, call.input.clone()).await;
            let observation = result.observation();
            self.record_step(
                TraceStep {
                    thought: thought.to_string(),
                    action: call.name.clone(),
                    observation: Some(observation.clone()),
                },
                on_step,
            );
            self.state.push(Message::tool_result(call.id, observation));
        }

        Ok(())
    }

    /// Execute one legacy action and return its observation.
    async fn run_legacy_action(
        &mut self,
        thought: &str,
        tool: &str,
        args: serde_json::Value,
        on_step: &Option<StepHandler>,
    ) -> Result<String, AgentError> {
        if !self.definition.is_tool_allowed(tool) {
            self.state.set_status(AgentStatus::Failed);
            return Err(AgentError::ToolNotPermitted(tool.to_string()));
        }

        self.state.set_status(AgentStatus::Acting);
        let result = self.dispatcher.invoke(tool, args).await;
        let observation = result.observation();
        self.record_step(
            TraceStep {
                thought: thought.to_string(),
                action: tool.to_string(),
                observation: Some(observation.clone()),
            },
            on_step,
        );
        Ok(observation)
    }

    fn record_step(&mut self, step: TraceStep, on_step: &Option<StepHandler>) {
        if let Some(handler) = on_step {
            handler(&step);
        }
        self.trace.push(step);
    }

    /// Compress the middle of the history when it exceeds the input
    /// budget. Failure leaves the history untouched.
    async fn compress_history_if_needed(&mut self) {
        let Some(budget) = self.definition.params.input_budget else {
            return;
        };
        if !self.state.needs_compression(budget) {
            return;
        }

        debug!(
            agent = %self.definition.name,
            tokens = self.state.estimated_tokens(),
            budget,
            "Compressing conversation history"
        );

        let span = self.state.compressible_span();
        let request = CompletionRequest::new(
            vec![
                Message::system(MissionPromptTemplate::summarizer_system()),
                Message::user(MissionPromptTemplate::summary_request(&span)),
            ],
            self.definition.params.clone(),
        );

        match self.gateway.complete(request, None).await {
            Ok(response) => {
                let summary = response.text_content();
                if summary.trim().is_empty() {
                    warn!(agent = %self.definition.name, "Summarizer returned no text, keeping history");
                } else {
                    self.state.apply_summary(summary.trim());
                }
            }
            Err(e) => {
                warn!(agent = %self.definition.name, "History compression failed: {}", e);
            }
        }
    }
}
