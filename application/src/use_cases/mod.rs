//! Use cases

pub mod execute_tool_task;
pub mod process_request;
pub mod run_agent;
pub mod run_mission;
pub mod shared;
pub mod triage;
