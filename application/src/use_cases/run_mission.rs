//! Mission orchestration
//!
//! Plans a roster of specialized agents and a staged task plan from a
//! goal, then executes stages strictly in order. Tasks within a stage
//! run concurrently and always run to completion; a failed or
//! unassignable task never aborts its stage. The roster lives in a map
//! owned by the running mission and is discarded with it.

use crate::dispatcher::ToolDispatcher;
use crate::ports::completion_gateway::{
    ChunkHandler, CompletionGateway, CompletionRequest, GatewayError,
};
use crate::ports::memory::{MemoryPort, NullMemory};
use crate::ports::progress::MissionProgressNotifier;
use crate::ports::progress_store::{NullProgressStore, ProgressStore, TaskProgressRecord};
use crate::use_cases::run_agent::{ReasoningAgent, StepHandler, TraceStep};
use crate::use_cases::shared::check_cancelled;
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use taskforce_domain::{
    AgentDefinition, Message, MissionPlan, MissionPromptTemplate, MissionSnapshot, ModelParams,
    PlanParseError, SystemPromptBuilder, parse_mission_plan, util::truncate_chars,
};
use thiserror::Error;
use tokio::sync::Mutex as AsyncMutex;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// How many recent task outputs are carried into the next task input
const DEFAULT_CONTEXT_WINDOW: usize = 3;

/// Errors that abort a mission
#[derive(Debug, Error)]
pub enum MissionError {
    #[error("Plan rejected: {0}")]
    PlanParse(#[from] PlanParseError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Mission cancelled")]
    Cancelled,
}

type SharedPlan = Arc<Mutex<MissionPlan>>;
type Roster = HashMap<String, Arc<AsyncMutex<ReasoningAgent>>>;

/// Plans and executes one mission per call
pub struct MissionOrchestrator {
    gateway: Arc<dyn CompletionGateway>,
    dispatcher: Arc<ToolDispatcher>,
    memory: Arc<dyn MemoryPort>,
    store: Arc<dyn ProgressStore>,
    params: ModelParams,
    session_id: String,
    context_window: usize,
    cancellation: Option<CancellationToken>,
}

impl MissionOrchestrator {
    pub fn new(gateway: Arc<dyn CompletionGateway>, dispatcher: Arc<ToolDispatcher>) -> Self {
        Self {
            gateway,
            dispatcher,
            memory: Arc::new(NullMemory),
            store: Arc::new(NullProgressStore),
            params: ModelParams::default(),
            session_id: "default".to_string(),
            context_window: DEFAULT_CONTEXT_WINDOW,
            cancellation: None,
        }
    }

    pub fn with_memory(mut self, memory: Arc<dyn MemoryPort>) -> Self {
        self.memory = memory;
        self
    }

    pub fn with_progress_store(mut self, store: Arc<dyn ProgressStore>) -> Self {
        self.store = store;
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

    pub fn with_context_window(mut self, window: usize) -> Self {
        self.context_window = window;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Plan and execute a mission for the goal. The result is the
    /// concatenation of task output blocks in declaration order.
    pub async fn execute(
        &self,
        goal: &str,
        context: &str,
        notifier: Arc<dyn MissionProgressNotifier>,
    ) -> Result<String, MissionError> {
        check_cancelled(&self.cancellation).map_err(|_| MissionError::Cancelled)?;
        notifier.on_status("Thinking (Staffing & Planning)...");

        let plan = self.plan_mission(goal, context).await?;
        notifier.on_status(&format!("Strategy: {}", truncate_chars(&plan.thoughts, 150)));

        let names: Vec<&str> = plan.roster.iter().map(|m| m.name.as_str()).collect();
        notifier.on_status(&format!("Assembling Team: {}", names.join(", ")));
        info!(
            stages = plan.stages.len(),
            tasks = plan.task_count(),
            "Mission plan accepted"
        );

        let roster = self.assemble_roster(&plan, goal).await;
        let plan: SharedPlan = Arc::new(Mutex::new(plan));
        emit_snapshot(&plan, &notifier);

        let stage_count = with_plan(&plan, |p| p.stages.len()).unwrap_or(0);
        let mut execution_log: Vec<String> = Vec::new();
        let mut all_outputs: Vec<String> = Vec::new();

        for stage_index in 0..stage_count {
            check_cancelled(&self.cancellation).map_err(|_| MissionError::Cancelled)?;

            let Some((stage_name, tasks)) = with_plan(&plan, |p| {
                let stage = &p.stages[stage_index];
                let tasks: Vec<(String, String, String)> = stage
                    .tasks
                    .iter()
                    .map(|t| (t.id.clone(), t.description.clone(), t.assignee.clone()))
                    .collect();
                (stage.name.clone(), tasks)
            }) else {
                break;
            };

            notifier.on_status(&format!("Starting Stage: {}", stage_name));

            // Tasks in a stage share the same trailing window of prior
            // outputs; results from this stage become visible only to
            // later stages.
            let shared_context = Self::shared_context(&execution_log, self.context_window);

            let futures = tasks.iter().enumerate().map(|(task_index, task)| {
                self.run_task(
                    &plan,
                    &roster,
                    &notifier,
                    stage_index,
                    task_index,
                    task.0.clone(),
                    task.1.clone(),
                    task.2.clone(),
                    shared_context.clone(),
                )
            });

            let outputs = join_all(futures).await;
            execution_log.extend(outputs.iter().cloned());
            all_outputs.extend(outputs);
        }

        check_cancelled(&self.cancellation).map_err(|_| MissionError::Cancelled)?;
        Ok(all_outputs.join("\n\n"))
    }

    /// One JSON-mode planning completion, strictly validated.
    async fn plan_mission(&self, goal: &str, context: &str) -> Result<MissionPlan, MissionError> {
        let catalog = self.dispatcher.catalog().await;
        let catalog_lines = catalog
            .iter()
            .map(|t| t.prompt_line())
            .collect::<Vec<_>>()
            .join("\n");

        let request = CompletionRequest::new(
            vec![
                Message::system(MissionPromptTemplate::planner_system()),
                Message::user(MissionPromptTemplate::planning_request(
                    goal,
                    context,
                    &catalog_lines,
                )),
            ],
            self.params.clone(),
        )
        .json_mode();

        let response = self.gateway.complete(request, None).await?;
        let plan = parse_mission_plan(goal, &response.text_content())?;
        Ok(plan)
    }

    /// One reasoning agent per roster member, seeded with persona, tool
    /// subset, and long-term memory context.
    async fn assemble_roster(&self, plan: &MissionPlan, goal: &str) -> Roster {
        let memory_context = match self.memory.search(goal, 5).await {
            Ok(entries) => entries
                .iter()
                .map(|e| e.content.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
            Err(e) => {
                warn!("Memory search failed, continuing without context: {}", e);
                String::new()
            }
        };

        let mut roster: Roster = HashMap::new();
        for member in &plan.roster {
            let tools = self.dispatcher.catalog_for(&member.tools).await;
            let system_prompt = SystemPromptBuilder::new(&member.name, "specialist")
                .with_persona(&member.persona)
                .with_tools(tools)
                .with_legacy_tooling(!self.params.native_tool_calling)
                .with_memory_context(&memory_context)
                .with_rule("Complete your assigned task and report the result.")
                .build();

            let definition = AgentDefinition::new(&member.name, "specialist")
                .with_persona(&member.persona)
                .with_params(self.params.clone())
                .with_allowed_tools(member.tools.clone());

            let mut agent = ReasoningAgent::new(
                definition,
                Arc::clone(&self.gateway),
                Arc::clone(&self.dispatcher),
                system_prompt,
            );
            if let Some(token) = &self.cancellation {
                agent = agent.with_cancellation(token.clone());
            }

            roster.insert(member.name.clone(), Arc::new(AsyncMutex::new(agent)));
        }
        roster
    }

    /// Trailing window of the most recent prior task outputs.
    fn shared_context(execution_log: &[String], window: usize) -> String {
        let start = execution_log.len().saturating_sub(window);
        execution_log[start..].join("\n")
    }

    /// Run one task to a settled status. Never fails the stage: MIA
    /// assignees and agent errors settle as failed tasks whose output
    /// block still joins the mission result.
    #[allow(clippy::too_many_arguments)]
    async fn run_task(
        &self,
        plan: &SharedPlan,
        roster: &Roster,
        notifier: &Arc<dyn MissionProgressNotifier>,
        stage_index: usize,
        task_index: usize,
        task_id: String,
        description: String,
        assignee: String,
        shared_context: String,
    ) -> String {
        let Some(agent) = roster.get(&assignee) else {
            let message = format!("Agent {} MIA. Skipping task: {}", assignee, description);
            warn!(task = %task_id, "{}", message);
            with_task(plan, stage_index, task_index, |t| t.mark_failed(&message));
            emit_snapshot(plan, notifier);
            self.write_record(
                TaskProgressRecord::started(&assignee, &self.session_id, &task_id, &description)
                    .failed(&message),
            )
            .await;
            return message;
        };

        notifier.on_status(&format!("[{}] Executing: {}", assignee, description));
        with_task(plan, stage_index, task_index, |t| t.mark_running());
        emit_snapshot(plan, notifier);
        self.write_record(TaskProgressRecord::started(
            &assignee,
            &self.session_id,
            &task_id,
            &description,
        ))
        .await;

        let input = if shared_context.is_empty() {
            description.clone()
        } else {
            format!(
                "{}\n\n[Shared Team Context (Previous Results)]:\n{}",
                description, shared_context
            )
        };

        let (on_chunk, line_buffer) =
            self.line_buffered_logger(plan, notifier, stage_index, task_index, &task_id);
        let on_step = self.step_logger(plan, notifier, stage_index, task_index, &task_id);

        let (result, trace) = {
            let mut agent = agent.lock().await;
            let result = agent
                .process(&input, Some(on_chunk), Some(on_step))
                .await;
            (result, agent.execution_trace())
        };

        // Flush a trailing partial line left in the chunk buffer
        let leftover = line_buffer
            .lock()
            .map(|mut buf| std::mem::take(&mut *buf))
            .unwrap_or_default();
        if !leftover.trim().is_empty() {
            let line = leftover.trim().to_string();
            with_task(plan, stage_index, task_index, |t| t.push_log(&line));
            notifier.on_task_log(&task_id, &line);
            emit_snapshot(plan, notifier);
        }

        match result {
            Ok(answer) => {
                let output = format!(
                    "### [Agent: {}]\n\n#### Task: {}\n\n{}\n\n**Final Result**: {}",
                    assignee, description, trace, answer
                );
                with_task(plan, stage_index, task_index, |t| t.mark_completed(&output));
                emit_snapshot(plan, notifier);
                self.write_record(
                    TaskProgressRecord::started(
                        &assignee,
                        &self.session_id,
                        &task_id,
                        &description,
                    )
                    .completed(&answer),
                )
                .await;
                output
            }
            Err(e) => {
                let message = format!("[{}] Failed: {}", assignee, e);
                warn!(task = %task_id, "{}", message);
                with_task(plan, stage_index, task_index, |t| t.mark_failed(&message));
                emit_snapshot(plan, notifier);
                self.write_record(
                    TaskProgressRecord::started(
                        &assignee,
                        &self.session_id,
                        &task_id,
                        &description,
                    )
                    .failed(e.to_string()),
                )
                .await;
                message
            }
        }
    }

    /// Chunk handler that assembles streamed text into whole log lines.
    fn line_buffered_logger(
        &self,
        plan: &SharedPlan,
        notifier: &Arc<dyn MissionProgressNotifier>,
        stage_index: usize,
        task_index: usize,
        task_id: &str,
    ) -> (ChunkHandler, Arc<Mutex<String>>) {
        let buffer: Arc<Mutex<String>> = Arc::new(Mutex::new(String::new()));
        let plan = Arc::clone(plan);
        let notifier = Arc::clone(notifier);
        let task_id = task_id.to_string();
        let handler_buffer = Arc::clone(&buffer);

        let handler: ChunkHandler = Arc::new(move |chunk: &str| {
            let mut lines = Vec::new();
            if let Ok(mut buf) = handler_buffer.lock() {
                buf.push_str(chunk);
                while let Some(pos) = buf.find('\n') {
                    let line = buf[..pos].trim().to_string();
                    buf.replace_range(..=pos, "");
                    if !line.is_empty() {
                        lines.push(line);
                    }
                }
            }
            for line in lines {
                with_task(&plan, stage_index, task_index, |t| t.push_log(&line));
                notifier.on_task_log(&task_id, &line);
                emit_snapshot(&plan, &notifier);
            }
        });

        (handler, buffer)
    }

    /// Step handler that mirrors reason-act steps into the task log.
    fn step_logger(
        &self,
        plan: &SharedPlan,
        notifier: &Arc<dyn MissionProgressNotifier>,
        stage_index: usize,
        task_index: usize,
        task_id: &str,
    ) -> StepHandler {
        let plan = Arc::clone(plan);
        let notifier = Arc::clone(notifier);
        let task_id = task_id.to_string();

        Arc::new(move |step: &TraceStep| {
            let line = format!("[{}] {}", step.action, truncate_chars(&step.thought, 120));
            with_task(&plan, stage_index, task_index, |t| t.push_log(&line));
            notifier.on_task_log(&task_id, &line);
            emit_snapshot(&plan, &notifier);
        })
    }

    async fn write_record(&self, record: TaskProgressRecord) {
        if let Err(e) = self.store.record(&record).await {
            warn!(task = %record.task_id, "Progress record not written: {}", e);
        }
    }
}

fn with_plan<T>(plan: &SharedPlan, f: impl FnOnce(&mut MissionPlan) -> T) -> Option<T> {
    plan.lock().ok().map(|mut p| f(&mut p))
}

fn with_task<T>(
    plan: &SharedPlan,
    stage_index: usize,
    task_index: usize,
    f: impl FnOnce(&mut taskforce_domain::Task) -> T,
) -> Option<T> {
    with_plan(plan, |p| {
        p.stages
            .get_mut(stage_index)
            .and_then(|s| s.tasks.get_mut(task_index))
            .map(f)
    })
    .flatten()
}

fn emit_snapshot(plan: &SharedPlan, notifier: &Arc<dyn MissionProgressNotifier>) {
    if let Ok(plan) = plan.lock() {
        notifier.on_snapshot(&MissionSnapshot::capture(&plan));
    }
}
