//! Task creation and dispatch.

use super::{DispatchFailure, TaskLifecycleService, TaskServiceResult};
use crate::task::{
    domain::{DispatchMode, QueuedTask, Task, TaskPayload},
    ports::{TaskExecutor, TaskRepository, WorkQueue},
};
use mockable::Clock;
use std::sync::Arc;

/// Request to create and dispatch a task.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTaskRequest {
    payload: TaskPayload,
    mode: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request using the default dispatch mode.
    #[must_use]
    pub const fn new(payload: TaskPayload) -> Self {
        Self {
            payload,
            mode: None,
        }
    }

    /// Sets the raw dispatch mode selector supplied by the caller.
    ///
    /// The value is validated only after the task record exists.
    #[must_use]
    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    /// Returns the raw dispatch mode selector, if any.
    #[must_use]
    pub fn mode(&self) -> Option<&str> {
        self.mode.as_deref()
    }

    /// Returns the work payload.
    #[must_use]
    pub const fn payload(&self) -> &TaskPayload {
        &self.payload
    }
}

/// Creates task records and hands each to exactly one runner.
pub struct TaskDispatcher<R, Q, E, C>
where
    R: TaskRepository + ?Sized,
    Q: WorkQueue + ?Sized,
    E: TaskExecutor + ?Sized,
    C: Clock + Send + Sync,
{
    lifecycle: TaskLifecycleService<R, C>,
    queue: Arc<Q>,
    executor: Arc<E>,
}

impl<R, Q, E, C> Clone for TaskDispatcher<R, Q, E, C>
where
    R: TaskRepository + ?Sized,
    Q: WorkQueue + ?Sized,
    E: TaskExecutor + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            lifecycle: self.lifecycle.clone(),
            queue: Arc::clone(&self.queue),
            executor: Arc::clone(&self.executor),
        }
    }
}

impl<R, Q, E, C> TaskDispatcher<R, Q, E, C>
where
    R: TaskRepository + ?Sized,
    Q: WorkQueue + ?Sized,
    E: TaskExecutor + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a dispatcher over the given lifecycle service and runners.
    #[must_use]
    pub const fn new(
        lifecycle: TaskLifecycleService<R, C>,
        queue: Arc<Q>,
        executor: Arc<E>,
    ) -> Self {
        Self {
            lifecycle,
            queue,
            executor,
        }
    }

    /// Records a `PENDING` task, then dispatches its payload.
    ///
    /// The record is persisted before the mode is examined, so a rejected
    /// mode leaves a `PENDING` record behind with nothing dispatched. In
    /// `process` mode the call returns only after the executor has recorded a
    /// terminal status; the returned record is still the initial `PENDING`
    /// view.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`](super::TaskServiceError::Repository)
    /// when the record cannot be stored,
    /// [`TaskServiceError::UnsupportedMode`](super::TaskServiceError::UnsupportedMode)
    /// for an unknown mode, and
    /// [`TaskServiceError::Dispatch`](super::TaskServiceError::Dispatch) when
    /// publishing or in-line execution fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskServiceResult<Task> {
        let task = self.lifecycle.create_pending().await?;
        let task_id = task.id();

        let mode = DispatchMode::resolve(request.mode()).inspect_err(|err| {
            tracing::warn!(task_id = %task_id, error = %err, "task left pending, no dispatch");
        })?;

        match mode {
            DispatchMode::Process => {
                let status = self
                    .executor
                    .run(task_id, request.payload())
                    .await
                    .map_err(|source| DispatchFailure::Execute { task_id, source })?;
                tracing::info!(task_id = %task_id, %mode, %status, "processed task in-line");
            }
            DispatchMode::Queue => {
                let message = QueuedTask::new(task_id, request.payload);
                self.queue
                    .publish(&message)
                    .await
                    .map_err(|source| DispatchFailure::Publish { task_id, source })?;
                tracing::info!(task_id = %task_id, %mode, "queued task");
            }
        }

        Ok(task)
    }
}
