//! Durable task progress port
//!
//! Every task status transition is recorded through this port, keyed by
//! (assignee, session, task id), so progress survives the process.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use taskforce_domain::TaskStatus;
use thiserror::Error;

/// Errors raised by a progress store backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Progress write failed: {0}")]
    WriteFailed(String),
}

/// One durable progress record
#[derive(Debug, Clone)]
pub struct TaskProgressRecord {
    pub assignee: String,
    pub session_id: String,
    pub task_id: String,
    pub status: TaskStatus,
    pub description: String,
    /// Final output when the task completed
    pub output: Option<String>,
    /// Failure message when the task failed
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl TaskProgressRecord {
    pub fn started(
        assignee: impl Into<String>,
        session_id: impl Into<String>,
        task_id: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            assignee: assignee.into(),
            session_id: session_id.into(),
            task_id: task_id.into(),
            status: TaskStatus::Running,
            description: description.into(),
            output: None,
            error: None,
            timestamp: Utc::now(),
        }
    }

    pub fn completed(mut self, output: impl Into<String>) -> Self {
        self.status = TaskStatus::Completed;
        self.output = Some(output.into());
        self.timestamp = Utc::now();
        self
    }

    pub fn failed(mut self, error: impl Into<String>) -> Self {
        self.status = TaskStatus::Failed;
        self.error = Some(error.into());
        self.timestamp = Utc::now();
        self
    }
}

/// Port to durable progress storage
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Persist one record, overwriting any prior record with the same
    /// (assignee, session, task id) key
    async fn record(&self, record: &TaskProgressRecord) -> Result<(), StoreError>;
}

/// Progress store that discards everything
pub struct NullProgressStore;

#[async_trait]
impl ProgressStore for NullProgressStore {
    async fn record(&self, _record: &TaskProgressRecord) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_transitions() {
        let started = TaskProgressRecord::started("Scout", "s1", "t1", "find sources");
        assert_eq!(started.status, TaskStatus::Running);
        assert!(started.output.is_none());

        let completed = started.clone().completed("found 3 sources");
        assert_eq!(completed.status, TaskStatus::Completed);
        assert_eq!(completed.output.as_deref(), Some("found 3 sources"));

        let failed = started.failed("network down");
        assert_eq!(failed.status, TaskStatus::Failed);
        assert_eq!(failed.error.as_deref(), Some("network down"));
    }

    #[tokio::test]
    async fn test_null_store_accepts_records() {
        let store = NullProgressStore;
        let record = TaskProgressRecord::started("Scout", "s1", "t1", "d");
        store.record(&record).await.unwrap();
    }
}
