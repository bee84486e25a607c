//! Mission plans, triage verdicts, and their parsers

pub mod entities;
pub mod plan_parser;
pub mod triage;

pub use entities::{
    MissionPlan, MissionSnapshot, RosterMember, Stage, StageSnapshot, Task, TaskSnapshot,
    TaskStatus,
};
pub use plan_parser::{PlanParseError, parse_mission_plan};
pub use triage::{TriageParseError, TriageVerdict, parse_triage_verdict};
