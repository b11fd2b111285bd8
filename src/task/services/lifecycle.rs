//! Service layer for task record creation, completion, and retrieval.

use super::{TaskServiceError, TaskServiceResult};
use crate::task::{
    domain::{Task, TaskCompletion, TaskId, TaskNotFoundError},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;

/// Task lifecycle orchestration service.
///
/// Owns the only path that moves a task past `PENDING`; every transition is
/// delegated to the repository, which arbitrates concurrent completions.
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for TaskLifecycleService<R, C>
where
    R: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Allocates a fresh identity and persists a `PENDING` record for it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the record cannot be
    /// stored.
    pub async fn create_pending(&self) -> TaskServiceResult<Task> {
        let task = Task::new(&*self.clock);
        self.repository.store(&task).await?;
        tracing::debug!(task_id = %task.id(), "stored pending task");
        Ok(task)
    }

    /// Records the single terminal transition for a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when no record exists, or
    /// [`TaskServiceError::Repository`] when the task is already terminal or
    /// persistence fails.
    pub async fn complete(
        &self,
        id: TaskId,
        completion: &TaskCompletion,
    ) -> TaskServiceResult<Task> {
        self.repository
            .complete(id, completion)
            .await
            .map_err(|err| match err {
                TaskRepositoryError::NotFound(missing) => TaskNotFoundError(missing).into(),
                other => other.into(),
            })
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when no record exists, or
    /// [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn find(&self, id: TaskId) -> TaskServiceResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::NotFound(TaskNotFoundError(id)))
    }

    /// Lists tasks in creation order, bounded by `limit` when given.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the listing fails.
    pub async fn list(&self, limit: Option<usize>) -> TaskServiceResult<Vec<Task>> {
        Ok(self.repository.list(limit).await?)
    }
}
