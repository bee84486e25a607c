//! Mission progress notification port
//!
//! Implementations live outside this crate and can render progress in
//! various ways (console, UI event stream). All callbacks default to
//! no-ops so implementors opt into what they need.

use taskforce_domain::MissionSnapshot;

/// Callbacks for live mission progress
pub trait MissionProgressNotifier: Send + Sync {
    /// High-level status line (planning, stage start, task start)
    fn on_status(&self, _message: &str) {}

    /// Full mission state after a task status change or log append
    fn on_snapshot(&self, _snapshot: &MissionSnapshot) {}

    /// One completed log line from a running task
    fn on_task_log(&self, _task_id: &str, _line: &str) {}

    /// A streamed chunk of the final user-facing response
    fn on_response_chunk(&self, _chunk: &str) {}
}

/// No-op notifier for when progress reporting is not needed
pub struct NoProgress;

impl MissionProgressNotifier for NoProgress {}
