//! File-backed progress store
//!
//! One markdown file per (assignee, session, task id). Each status
//! transition rewrites the file, so the latest state always wins and a
//! crash leaves at most one stale record behind.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use taskforce_application::{ProgressStore, StoreError, TaskProgressRecord};
use taskforce_domain::TaskStatus;
use tracing::debug;

/// Stores task progress as markdown files under one directory
pub struct FileProgressStore {
    dir: PathBuf,
}

impl FileProgressStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Replace everything outside `[A-Za-z0-9_-]` so any agent or task
    /// name yields a valid file name.
    fn sanitize(part: &str) -> String {
        part.chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }

    fn file_path(&self, record: &TaskProgressRecord) -> PathBuf {
        let name = format!(
            "{}_{}_{}.md",
            Self::sanitize(&record.assignee),
            Self::sanitize(&record.session_id),
            Self::sanitize(&record.task_id)
        );
        self.dir.join(name)
    }

    fn status_label(status: TaskStatus) -> &'static str {
        match status {
            TaskStatus::Pending => "pending",
            TaskStatus::Running => "running",
            TaskStatus::Completed => "completed",
            TaskStatus::Failed => "failed",
        }
    }

    fn render(record: &TaskProgressRecord) -> String {
        let mut content = format!(
            "# Task Progress: {}\n\n- **Task ID**: {}\n- **Session ID**: {}\n- **Agent**: {}\n- **Status**: {}\n- **Time**: {}\n\n## Description\n\n{}\n",
            record.task_id,
            record.task_id,
            record.session_id,
            record.assignee,
            Self::status_label(record.status),
            record.timestamp.to_rfc3339(),
            record.description,
        );
        if let Some(output) = &record.output {
            content.push_str(&format!("\n## Result\n\n{}\n", output));
        }
        if let Some(error) = &record.error {
            content.push_str(&format!("\n## Error\n\n{}\n", error));
        }
        content
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl ProgressStore for FileProgressStore {
    async fn record(&self, record: &TaskProgressRecord) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        let path = self.file_path(record);
        debug!(path = %path.display(), "Writing task progress record");
        tokio::fs::write(&path, Self::render(record))
            .await
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_safe_chars_only() {
        assert_eq!(FileProgressStore::sanitize("Agent One!"), "Agent_One_");
        assert_eq!(FileProgressStore::sanitize("task-1_final"), "task-1_final");
        assert_eq!(FileProgressStore::sanitize("a/b\\c"), "a_b_c");
    }

    #[tokio::test]
    async fn test_record_writes_markdown_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileProgressStore::new(dir.path());

        let record = TaskProgressRecord::started("Scout", "session-1", "t1", "find sources");
        store.record(&record).await.unwrap();

        let path = dir.path().join("Scout_session-1_t1.md");
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("# Task Progress: t1"));
        assert!(content.contains("- **Status**: running"));
        assert!(content.contains("find sources"));
        assert!(!content.contains("## Result"));
    }

    #[tokio::test]
    async fn test_settled_record_overwrites_started() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileProgressStore::new(dir.path());

        let started = TaskProgressRecord::started("Scout", "s", "t1", "work");
        store.record(&started).await.unwrap();
        store
            .record(&started.clone().completed("all results"))
            .await
            .unwrap();

        let content =
            std::fs::read_to_string(dir.path().join("Scout_s_t1.md")).unwrap();
        assert!(content.contains("- **Status**: completed"));
        assert!(content.contains("## Result\n\nall results"));
    }

    #[tokio::test]
    async fn test_failed_record_carries_error_section() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileProgressStore::new(dir.path());

        let record = TaskProgressRecord::started("Scout", "s", "t1", "work").failed("boom");
        store.record(&record).await.unwrap();

        let content =
            std::fs::read_to_string(dir.path().join("Scout_s_t1.md")).unwrap();
        assert!(content.contains("- **Status**: failed"));
        assert!(content.contains("## Error\n\nboom"));
    }

    #[tokio::test]
    async fn test_unsafe_names_are_sanitized_in_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileProgressStore::new(dir.path());

        let record = TaskProgressRecord::started("Agent/One", "s:1", "t 1", "work");
        store.record(&record).await.unwrap();

        assert!(dir.path().join("Agent_One_s_1_t_1.md").exists());
    }

    #[tokio::test]
    async fn test_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("deep").join("progress");
        let store = FileProgressStore::new(&nested);

        let record = TaskProgressRecord::started("Scout", "s", "t1", "work");
        store.record(&record).await.unwrap();
        assert!(nested.join("Scout_s_t1.md").exists());
    }
}
