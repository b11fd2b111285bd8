//! Executor ports: the runner that drives a task to a terminal status, and
//! the unit of work it runs.

use super::TaskRepositoryError;
use crate::task::domain::{TaskId, TaskOutput, TaskPayload, TaskStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for executor operations.
pub type TaskExecutorResult<T> = Result<T, TaskExecutorError>;

/// Runs the work for a task.
///
/// Implementations must record the terminal status in the task record store
/// before returning. A failure of the work itself is recorded as
/// [`TaskStatus::Error`] and is not an executor error.
#[async_trait]
pub trait TaskExecutor: Send + Sync {
    /// Runs the work for `task_id` and returns the recorded terminal status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskExecutorError`] when the terminal status could not be
    /// recorded.
    async fn run(&self, task_id: TaskId, payload: &TaskPayload)
    -> TaskExecutorResult<TaskStatus>;
}

/// Errors returned when an executor cannot drive a task to completion.
#[derive(Debug, Clone, Error)]
pub enum TaskExecutorError {
    /// The terminal status could not be recorded.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// Executor runtime failure.
    #[error("executor runtime error: {0}")]
    Runtime(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskExecutorError {
    /// Wraps an executor runtime error.
    pub fn runtime(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Runtime(Arc::new(err))
    }
}

/// Application-specific work performed for a task.
#[async_trait]
pub trait TaskHandler: Send + Sync {
    /// Performs the work and returns its output fields.
    ///
    /// # Errors
    ///
    /// Returns [`TaskHandlerError`] for any failure while performing the
    /// work, including infrastructure failures.
    async fn handle(
        &self,
        task_id: TaskId,
        payload: &TaskPayload,
    ) -> Result<TaskOutput, TaskHandlerError>;
}

/// Failure reported by a [`TaskHandler`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct TaskHandlerError {
    message: String,
}

impl TaskHandlerError {
    /// Creates a handler failure with a human-readable message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Creates a handler failure from another error.
    #[must_use]
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        Self::new(err.to_string())
    }

    /// Returns the failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
