//! Repository port for the authoritative task record store.

use crate::task::domain::{Task, TaskCompletion, TaskId, TaskStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// The repository is the single source of truth for task status and output.
/// Records for different identifiers are independent of one another.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the identifier
    /// already exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Records the terminal transition of a `PENDING` task and returns the
    /// updated record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist
    /// or [`TaskRepositoryError::AlreadyTerminal`] when another executor has
    /// already finished it. The stored record is left unchanged in both
    /// cases.
    async fn complete(&self, id: TaskId, completion: &TaskCompletion)
    -> TaskRepositoryResult<Task>;

    /// Lists tasks in creation order, returning at most `limit` records when
    /// a limit is given.
    async fn list(&self, limit: Option<usize>) -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The task already reached a terminal status.
    #[error("task {task_id} is already terminal with status {status}")]
    AlreadyTerminal {
        /// Task identifier.
        task_id: TaskId,
        /// Status recorded by the first executor.
        status: TaskStatus,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
