//! Mission plan parsing
//!
//! The planning completion is requested in JSON mode and must match the
//! schema described in the planner prompt. Parsing is strict: a plan
//! that fails schema validation aborts the mission rather than running
//! a half-understood plan.

use crate::mission::entities::{MissionPlan, RosterMember, Stage, Task, TaskStatus};
use crate::util::strip_code_fences;
use serde::Deserialize;
use std::collections::HashSet;
use thiserror::Error;

/// Errors raised while parsing a planning completion
#[derive(Debug, Error)]
pub enum PlanParseError {
    #[error("Invalid plan JSON: {0}")]
    Json(String),

    #[error("Plan has an empty roster")]
    EmptyRoster,

    #[error("Duplicate roster member '{0}'")]
    DuplicateRosterMember(String),

    #[error("Plan has no stages")]
    EmptyMission,

    #[error("Stage '{0}' has no tasks")]
    EmptyStage(String),

    #[error("Task '{0}' has no description")]
    MissingDescription(String),

    #[error("Task '{0}' has no assignee")]
    MissingAssignee(String),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPlan {
    #[serde(default)]
    thoughts: String,
    roster: Vec<RawRosterMember>,
    mission: Vec<RawStage>,
}

#[derive(Debug, Deserialize)]
struct RawRosterMember {
    name: String,
    #[serde(default)]
    persona: String,
    #[serde(default)]
    capabilities: Vec<String>,
    #[serde(default)]
    tools: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawStage {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    tasks: Vec<RawTask>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTask {
    #[serde(default)]
    id: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    assigned_to: String,
    #[serde(default)]
    dependencies: Vec<String>,
}

/// Parse and validate a planning completion into a [`MissionPlan`].
///
/// `goal` is attached by the caller; the model output only carries
/// rationale, roster, and stages.
pub fn parse_mission_plan(goal: &str, text: &str) -> Result<MissionPlan, PlanParseError> {
    let stripped = strip_code_fences(text);
    let raw: RawPlan =
        serde_json::from_str(stripped).map_err(|e| PlanParseError::Json(e.to_string()))?;

    if raw.roster.is_empty() {
        return Err(PlanParseError::EmptyRoster);
    }
    let mut seen = HashSet::new();
    for member in &raw.roster {
        if !seen.insert(member.name.as_str()) {
            return Err(PlanParseError::DuplicateRosterMember(member.name.clone()));
        }
    }
    if raw.mission.is_empty() {
        return Err(PlanParseError::EmptyMission);
    }

    let roster = raw
        .roster
        .into_iter()
        .map(|m| RosterMember {
            name: m.name,
            persona: m.persona,
            capabilities: m.capabilities,
            tools: m.tools,
        })
        .collect();

    let mut stages = Vec::new();
    for (stage_index, raw_stage) in raw.mission.into_iter().enumerate() {
        let stage_id = if raw_stage.id.is_empty() {
            format!("stage-{}", stage_index + 1)
        } else {
            raw_stage.id
        };
        if raw_stage.tasks.is_empty() {
            return Err(PlanParseError::EmptyStage(stage_id));
        }

        let mut tasks = Vec::new();
        for (task_index, raw_task) in raw_stage.tasks.into_iter().enumerate() {
            let task_id = if raw_task.id.is_empty() {
                format!("{}-task-{}", stage_id, task_index + 1)
            } else {
                raw_task.id
            };
            if raw_task.description.trim().is_empty() {
                return Err(PlanParseError::MissingDescription(task_id));
            }
            if raw_task.assigned_to.trim().is_empty() {
                return Err(PlanParseError::MissingAssignee(task_id));
            }
            tasks.push(Task {
                id: task_id,
                description: raw_task.description,
                assignee: raw_task.assigned_to,
                status: TaskStatus::Pending,
                output: None,
                logs: Vec::new(),
                dependencies: raw_task.dependencies,
            });
        }

        stages.push(Stage {
            id: stage_id,
            name: raw_stage.name,
            tasks,
        });
    }

    Ok(MissionPlan {
        goal: goal.to_string(),
        thoughts: raw.thoughts,
        roster,
        stages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_PLAN: &str = r#"{
        "thoughts": "Research first, then write.",
        "roster": [
            {"name": "Scout", "persona": "You research.", "capabilities": ["search"], "tools": ["web_search"]},
            {"name": "Scribe", "persona": "You write.", "capabilities": [], "tools": []}
        ],
        "mission": [
            {"id": "s1", "name": "Research", "tasks": [
                {"id": "t1", "description": "Find sources", "assignedTo": "Scout", "dependencies": []}
            ]},
            {"id": "s2", "name": "Write", "tasks": [
                {"id": "t2", "description": "Draft the report", "assignedTo": "Scribe", "dependencies": ["t1"]}
            ]}
        ]
    }"#;

    #[test]
    fn test_parse_valid_plan() {
        let plan = parse_mission_plan("write a report", VALID_PLAN).unwrap();
        assert_eq!(plan.goal, "write a report");
        assert_eq!(plan.thoughts, "Research first, then write.");
        assert_eq!(plan.roster.len(), 2);
        assert_eq!(plan.stages.len(), 2);
        assert_eq!(plan.stages[0].tasks[0].assignee, "Scout");
        assert_eq!(plan.stages[1].tasks[0].dependencies, vec!["t1".to_string()]);
        assert_eq!(plan.stages[0].tasks[0].status, TaskStatus::Pending);
    }

    #[test]
    fn test_parse_fenced_plan() {
        let fenced = format!("```json\n{}\n```", VALID_PLAN);
        let plan = parse_mission_plan("goal", &fenced).unwrap();
        assert_eq!(plan.roster.len(), 2);
    }

    #[test]
    fn test_reject_invalid_json() {
        let err = parse_mission_plan("goal", "not json at all").unwrap_err();
        assert!(matches!(err, PlanParseError::Json(_)));
    }

    #[test]
    fn test_reject_empty_roster() {
        let text = r#"{"thoughts": "", "roster": [], "mission": [{"id": "s1", "name": "S", "tasks": [{"id": "t1", "description": "d", "assignedTo": "A"}]}]}"#;
        let err = parse_mission_plan("goal", text).unwrap_err();
        assert!(matches!(err, PlanParseError::EmptyRoster));
    }

    #[test]
    fn test_reject_duplicate_roster_names() {
        let text = r#"{
            "roster": [
                {"name": "Scout", "persona": "a"},
                {"name": "Scout", "persona": "b"}
            ],
            "mission": [{"id": "s1", "name": "S", "tasks": [{"id": "t1", "description": "d", "assignedTo": "Scout"}]}]
        }"#;
        let err = parse_mission_plan("goal", text).unwrap_err();
        assert!(matches!(err, PlanParseError::DuplicateRosterMember(name) if name == "Scout"));
    }

    #[test]
    fn test_reject_empty_mission() {
        let text = r#"{"roster": [{"name": "Scout", "persona": "a"}], "mission": []}"#;
        let err = parse_mission_plan("goal", text).unwrap_err();
        assert!(matches!(err, PlanParseError::EmptyMission));
    }

    #[test]
    fn test_reject_stage_without_tasks() {
        let text = r#"{"roster": [{"name": "Scout", "persona": "a"}], "mission": [{"id": "s1", "name": "S", "tasks": []}]}"#;
        let err = parse_mission_plan("goal", text).unwrap_err();
        assert!(matches!(err, PlanParseError::EmptyStage(id) if id == "s1"));
    }

    #[test]
    fn test_reject_task_without_assignee() {
        let text = r#"{"roster": [{"name": "Scout", "persona": "a"}], "mission": [{"id": "s1", "name": "S", "tasks": [{"id": "t1", "description": "d"}]}]}"#;
        let err = parse_mission_plan("goal", text).unwrap_err();
        assert!(matches!(err, PlanParseError::MissingAssignee(id) if id == "t1"));
    }

    #[test]
    fn test_reject_task_without_description() {
        let text = r#"{"roster": [{"name": "Scout", "persona": "a"}], "mission": [{"id": "s1", "name": "S", "tasks": [{"id": "t1", "assignedTo": "Scout"}]}]}"#;
        let err = parse_mission_plan("goal", text).unwrap_err();
        assert!(matches!(err, PlanParseError::MissingDescription(id) if id == "t1"));
    }

    #[test]
    fn test_missing_ids_get_sequential_fallbacks() {
        let text = r#"{
            "roster": [{"name": "Scout", "persona": "a"}],
            "mission": [{"name": "S", "tasks": [
                {"description": "first", "assignedTo": "Scout"},
                {"description": "second", "assignedTo": "Scout"}
            ]}]
        }"#;
        let plan = parse_mission_plan("goal", text).unwrap();
        assert_eq!(plan.stages[0].id, "stage-1");
        assert_eq!(plan.stages[0].tasks[0].id, "stage-1-task-1");
        assert_eq!(plan.stages[0].tasks[1].id, "stage-1-task-2");
    }

    #[test]
    fn test_unknown_assignee_is_accepted_at_parse_time() {
        // Assignee existence is a runtime concern, not a schema concern
        let text = r#"{
            "roster": [{"name": "Scout", "persona": "a"}],
            "mission": [{"id": "s1", "name": "S", "tasks": [
                {"id": "t1", "description": "d", "assignedTo": "Nobody"}
            ]}]
        }"#;
        let plan = parse_mission_plan("goal", text).unwrap();
        assert_eq!(plan.stages[0].tasks[0].assignee, "Nobody");
        assert!(plan.member("Nobody").is_none());
    }
}
