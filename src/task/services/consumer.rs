//! Queue consumer draining published tasks through an executor.

use crate::task::ports::{TaskExecutor, WorkQueue, WorkQueueResult};
use std::sync::Arc;

/// Outcome of one drain pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainReport {
    /// Messages whose terminal status was recorded.
    pub processed: usize,
    /// Messages whose execution could not be recorded.
    pub failed: usize,
}

impl DrainReport {
    /// Returns the number of messages pulled from the queue.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.processed + self.failed
    }
}

/// Pulls queued tasks and runs each through an executor.
///
/// There are no retries: a message whose execution fails is logged and
/// dropped.
pub struct QueueConsumer<Q, E>
where
    Q: WorkQueue + ?Sized,
    E: TaskExecutor + ?Sized,
{
    queue: Arc<Q>,
    executor: Arc<E>,
}

impl<Q, E> QueueConsumer<Q, E>
where
    Q: WorkQueue + ?Sized,
    E: TaskExecutor + ?Sized,
{
    /// Creates a consumer for the given queue and executor.
    #[must_use]
    pub const fn new(queue: Arc<Q>, executor: Arc<E>) -> Self {
        Self { queue, executor }
    }

    /// Drains up to `max` pending messages, executing them in queue order.
    ///
    /// # Errors
    ///
    /// Returns the queue error when messages cannot be pulled. Per-message
    /// execution failures are counted in the report instead.
    pub async fn drain_pending_events(&self, max: usize) -> WorkQueueResult<DrainReport> {
        let messages = self.queue.drain(max).await?;
        let mut report = DrainReport::default();

        for message in messages {
            let task_id = message.task_id();
            match self.executor.run(task_id, message.payload()).await {
                Ok(status) => {
                    report.processed += 1;
                    tracing::info!(task_id = %task_id, %status, "consumed queued task");
                }
                Err(err) => {
                    report.failed += 1;
                    tracing::error!(task_id = %task_id, error = %err, "queued task execution failed");
                }
            }
        }

        Ok(report)
    }
}
