//! Mission entities
//!
//! A [`MissionPlan`] is the accepted output of the planning completion:
//! a roster of specialized agents plus an ordered list of stages. The
//! plan structure is immutable during execution; only task status,
//! output, and logs change.

use serde::{Deserialize, Serialize};

/// Execution status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    Running,
    Completed,
    Failed,
}

impl TaskStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }
}

/// A single unit of work assigned to a roster member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub description: String,
    /// Roster member name this task is assigned to
    pub assignee: String,
    pub status: TaskStatus,
    /// Final output block once the task settles
    pub output: Option<String>,
    /// Streamed log lines accumulated during execution
    pub logs: Vec<String>,
    /// Declared by the planner but never consulted by scheduling;
    /// stages are the only ordering primitive
    pub dependencies: Vec<String>,
}

impl Task {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        assignee: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            assignee: assignee.into(),
            status: TaskStatus::Pending,
            output: None,
            logs: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    pub fn mark_running(&mut self) {
        self.status = TaskStatus::Running;
    }

    pub fn mark_completed(&mut self, output: impl Into<String>) {
        self.status = TaskStatus::Completed;
        self.output = Some(output.into());
    }

    pub fn mark_failed(&mut self, output: impl Into<String>) {
        self.status = TaskStatus::Failed;
        self.output = Some(output.into());
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        self.logs.push(line.into());
    }
}

/// An ordered group of tasks that run concurrently
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stage {
    pub id: String,
    pub name: String,
    pub tasks: Vec<Task>,
}

impl Stage {
    pub fn new(id: impl Into<String>, name: impl Into<String>, tasks: Vec<Task>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tasks,
        }
    }
}

/// A specialized agent described by the planner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterMember {
    /// Unique within the roster
    pub name: String,
    /// Persona text woven into the member's system prompt
    pub persona: String,
    /// Capability tags, informational only
    pub capabilities: Vec<String>,
    /// Tools this member may use
    pub tools: Vec<String>,
}

impl RosterMember {
    pub fn new(name: impl Into<String>, persona: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            persona: persona.into(),
            capabilities: Vec::new(),
            tools: Vec::new(),
        }
    }

    pub fn with_tools(mut self, tools: Vec<String>) -> Self {
        self.tools = tools;
        self
    }
}

/// The accepted plan for one mission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionPlan {
    /// The goal the plan was produced for
    pub goal: String,
    /// Planner rationale
    pub thoughts: String,
    pub roster: Vec<RosterMember>,
    pub stages: Vec<Stage>,
}

impl MissionPlan {
    /// Look up a roster member by name
    pub fn member(&self, name: &str) -> Option<&RosterMember> {
        self.roster.iter().find(|m| m.name == name)
    }

    /// Total number of tasks across all stages
    pub fn task_count(&self) -> usize {
        self.stages.iter().map(|s| s.tasks.len()).sum()
    }
}

/// Serializable view of one task for live rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskSnapshot {
    pub id: String,
    pub assignee: String,
    pub description: String,
    pub status: TaskStatus,
    pub output: Option<String>,
    pub logs: Vec<String>,
    /// Tools available to the assignee
    pub tools: Vec<String>,
}

/// Serializable view of one stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageSnapshot {
    pub id: String,
    pub name: String,
    pub tasks: Vec<TaskSnapshot>,
}

/// Full mission state at a point in time, emitted after every task
/// status change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionSnapshot {
    pub goal: String,
    pub stages: Vec<StageSnapshot>,
}

impl MissionSnapshot {
    pub fn capture(plan: &MissionPlan) -> Self {
        let stages = plan
            .stages
            .iter()
            .map(|stage| StageSnapshot {
                id: stage.id.clone(),
                name: stage.name.clone(),
                tasks: stage
                    .tasks
                    .iter()
                    .map(|task| TaskSnapshot {
                        id: task.id.clone(),
                        assignee: task.assignee.clone(),
                        description: task.description.clone(),
                        status: task.status,
                        output: task.output.clone(),
                        logs: task.logs.clone(),
                        tools: plan
                            .member(&task.assignee)
                            .map(|m| m.tools.clone())
                            .unwrap_or_default(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            goal: plan.goal.clone(),
            stages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_plan() -> MissionPlan {
        MissionPlan {
            goal: "ship it".to_string(),
            thoughts: "two stages".to_string(),
            roster: vec![
                RosterMember::new("Scout", "You research.")
                    .with_tools(vec!["web_search".to_string()]),
                RosterMember::new("Scribe", "You write."),
            ],
            stages: vec![
                Stage::new(
                    "s1",
                    "Research",
                    vec![Task::new("t1", "find sources", "Scout")],
                ),
                Stage::new(
                    "s2",
                    "Write",
                    vec![
                        Task::new("t2", "draft", "Scribe"),
                        Task::new("t3", "review", "Ghost"),
                    ],
                ),
            ],
        }
    }

    #[test]
    fn test_task_lifecycle() {
        let mut task = Task::new("t1", "do things", "Scout");
        assert_eq!(task.status, TaskStatus::Pending);
        assert!(!task.status.is_terminal());

        task.mark_running();
        assert_eq!(task.status, TaskStatus::Running);

        task.mark_completed("done");
        assert!(task.status.is_terminal());
        assert_eq!(task.output.as_deref(), Some("done"));
    }

    #[test]
    fn test_mark_failed_stores_message() {
        let mut task = Task::new("t1", "do things", "Scout");
        task.mark_failed("[Scout] Failed: boom");
        assert_eq!(task.status, TaskStatus::Failed);
        assert_eq!(task.output.as_deref(), Some("[Scout] Failed: boom"));
    }

    #[test]
    fn test_member_lookup() {
        let plan = sample_plan();
        assert!(plan.member("Scout").is_some());
        assert!(plan.member("Ghost").is_none());
    }

    #[test]
    fn test_task_count() {
        assert_eq!(sample_plan().task_count(), 3);
    }

    #[test]
    fn test_snapshot_carries_assignee_tools() {
        let plan = sample_plan();
        let snapshot = MissionSnapshot::capture(&plan);

        assert_eq!(snapshot.stages.len(), 2);
        let scout_task = &snapshot.stages[0].tasks[0];
        assert_eq!(scout_task.tools, vec!["web_search".to_string()]);

        // Unknown assignee gets an empty tool list, not a panic
        let ghost_task = &snapshot.stages[1].tasks[1];
        assert!(ghost_task.tools.is_empty());
    }

    #[test]
    fn test_snapshot_reflects_task_state() {
        let mut plan = sample_plan();
        plan.stages[0].tasks[0].mark_running();
        plan.stages[0].tasks[0].push_log("searching...");

        let snapshot = MissionSnapshot::capture(&plan);
        let task = &snapshot.stages[0].tasks[0];
        assert_eq!(task.status, TaskStatus::Running);
        assert_eq!(task.logs, vec!["searching...".to_string()]);
    }
}
