//! Long-term memory port
//!
//! Vector or keyword search over prior conversations lives behind this
//! port. Memory failures are never fatal to the caller; use cases log
//! and continue.

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by a memory backend
#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("Memory backend unavailable: {0}")]
    Unavailable(String),

    #[error("Memory operation failed: {0}")]
    OperationFailed(String),
}

/// One stored or retrieved memory entry
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryEntry {
    pub content: String,
    pub tags: Vec<String>,
    pub session_id: Option<String>,
}

impl MemoryEntry {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tags: Vec::new(),
            session_id: None,
        }
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

/// Port to long-term memory
#[async_trait]
pub trait MemoryPort: Send + Sync {
    /// Search for entries relevant to the query
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<MemoryEntry>, MemoryError>;

    /// Persist an entry
    async fn write(&self, entry: MemoryEntry) -> Result<(), MemoryError>;
}

/// Memory backend that stores nothing and finds nothing
pub struct NullMemory;

#[async_trait]
impl MemoryPort for NullMemory {
    async fn search(&self, _query: &str, _limit: usize) -> Result<Vec<MemoryEntry>, MemoryError> {
        Ok(Vec::new())
    }

    async fn write(&self, _entry: MemoryEntry) -> Result<(), MemoryError> {
        Ok(())
    }
}
