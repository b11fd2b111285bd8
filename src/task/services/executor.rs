//! Executor that runs a [`TaskHandler`] and records its outcome.

use crate::task::{
    domain::{TaskCompletion, TaskId, TaskPayload, TaskStatus},
    ports::{TaskExecutor, TaskExecutorResult, TaskHandler, TaskRepository},
};
use async_trait::async_trait;
use mockable::Clock;
use std::sync::Arc;
use tokio::task::JoinError;

/// Failure message recorded when a handler panics.
pub const HANDLER_PANIC_MESSAGE: &str = "task handler panicked";

/// Failure message recorded when a handler is cancelled before finishing.
pub const HANDLER_CANCELLED_MESSAGE: &str = "task handler was cancelled";

/// Runs a handler and records `SUCCESS` with its output or `ERROR` with its
/// failure message.
///
/// Serves both the in-line `process` path and the queue consumer. The handler
/// runs on its own Tokio task, so a panic inside it is recorded as an `ERROR`
/// completion instead of unwinding into the caller.
pub struct HandlerExecutor<R, H, C>
where
    R: TaskRepository + ?Sized,
    H: TaskHandler + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    handler: Arc<H>,
    clock: Arc<C>,
}

impl<R, H, C> HandlerExecutor<R, H, C>
where
    R: TaskRepository + ?Sized,
    H: TaskHandler + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates an executor for the given handler.
    #[must_use]
    pub const fn new(repository: Arc<R>, handler: Arc<H>, clock: Arc<C>) -> Self {
        Self {
            repository,
            handler,
            clock,
        }
    }
}

#[async_trait]
impl<R, H, C> TaskExecutor for HandlerExecutor<R, H, C>
where
    R: TaskRepository + ?Sized,
    H: TaskHandler + ?Sized + 'static,
    C: Clock + Send + Sync,
{
    async fn run(
        &self,
        task_id: TaskId,
        payload: &TaskPayload,
    ) -> TaskExecutorResult<TaskStatus> {
        let handler = Arc::clone(&self.handler);
        let owned_payload = payload.clone();
        let outcome =
            tokio::spawn(async move { handler.handle(task_id, &owned_payload).await }).await;

        let completion = match outcome {
            Ok(Ok(output)) => TaskCompletion::success(output, &*self.clock),
            Ok(Err(err)) => {
                tracing::warn!(task_id = %task_id, error = %err, "task handler failed");
                TaskCompletion::failure(err.message(), &*self.clock)
            }
            Err(join_err) => {
                tracing::error!(task_id = %task_id, error = %join_err, "task handler aborted");
                TaskCompletion::failure(abort_message(&join_err), &*self.clock)
            }
        };

        let task = self.repository.complete(task_id, &completion).await?;
        Ok(task.status())
    }
}

fn abort_message(err: &JoinError) -> &'static str {
    if err.is_panic() {
        HANDLER_PANIC_MESSAGE
    } else {
        HANDLER_CANCELLED_MESSAGE
    }
}
