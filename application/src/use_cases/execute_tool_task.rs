//! Direct tool task execution with bounded retries
//!
//! For work that is a single known tool call rather than a reasoning
//! loop. Failures are retried with a linear backoff; exhaustion becomes
//! a hard error carrying the last failure message.

use crate::dispatcher::ToolDispatcher;
use std::sync::Arc;
use std::time::Duration;
use taskforce_domain::ToolResult;
use thiserror::Error;
use tracing::warn;

const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(1000);

/// Errors raised by direct tool task execution
#[derive(Debug, Error)]
pub enum ToolTaskError {
    #[error("Tool '{tool}' failed after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        tool: String,
        attempts: u32,
        last_error: String,
    },
}

/// Executes one tool call with bounded retries
pub struct ExecuteToolTaskUseCase {
    dispatcher: Arc<ToolDispatcher>,
    max_retries: u32,
    retry_delay: Duration,
}

impl ExecuteToolTaskUseCase {
    pub fn new(dispatcher: Arc<ToolDispatcher>) -> Self {
        Self {
            dispatcher,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Invoke the tool, retrying failures up to `max_retries` times.
    /// The wait before attempt `n` is `retry_delay * n`.
    pub async fn execute(
        &self,
        tool: &str,
        arguments: serde_json::Value,
    ) -> Result<ToolResult, ToolTaskError> {
        let mut attempt: u32 = 0;

        loop {
            let result = self.dispatcher.invoke(tool, arguments.clone()).await;
            if result.is_success() {
                return Ok(result);
            }

            let last_error = result
                .error
                .map(|e| e.message)
                .unwrap_or_else(|| "unknown tool failure".to_string());
            attempt += 1;

            if attempt > self.max_retries {
                return Err(ToolTaskError::RetriesExhausted {
                    tool: tool.to_string(),
                    attempts: attempt,
                    last_error,
                });
            }

            warn!(
                tool,
                attempt,
                max_retries = self.max_retries,
                "Tool call failed, retrying: {}",
                last_error
            );
            tokio::time::sleep(self.retry_delay * attempt).await;
        }
    }
}
