//! Service-level errors for task orchestration.

use crate::task::{
    domain::{TaskDomainError, TaskId, TaskNotFoundError, UnsupportedModeError},
    ports::{TaskExecutorError, TaskRepositoryError, WorkQueueError},
};
use thiserror::Error;

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Errors returned by task services.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The requested dispatch mode is not supported.
    #[error(transparent)]
    UnsupportedMode(#[from] UnsupportedModeError),

    /// No task exists for the requested identifier.
    #[error(transparent)]
    NotFound(#[from] TaskNotFoundError),

    /// The task was recorded but could not be handed to its runner.
    #[error(transparent)]
    Dispatch(#[from] DispatchFailure),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// A result view could not be serialized.
    #[error("failed to encode task result: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl TaskServiceError {
    /// Returns `true` when the error stems from caller input rather than an
    /// infrastructure failure.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Domain(_) | Self::UnsupportedMode(_) | Self::NotFound(_)
        )
    }
}

/// Failure to hand a freshly recorded task to its runner.
///
/// The task record stays `PENDING` in both cases.
#[derive(Debug, Error)]
pub enum DispatchFailure {
    /// The queue refused the message.
    #[error("failed to publish task {task_id}: {source}")]
    Publish {
        /// Task that was not published.
        task_id: TaskId,
        /// Queue error.
        source: WorkQueueError,
    },

    /// The synchronous executor could not record a terminal status.
    #[error("failed to execute task {task_id}: {source}")]
    Execute {
        /// Task that was not completed.
        task_id: TaskId,
        /// Executor error.
        source: TaskExecutorError,
    },
}

impl DispatchFailure {
    /// Returns the task the failure refers to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        match self {
            Self::Publish { task_id, .. } | Self::Execute { task_id, .. } => *task_id,
        }
    }
}
