//! Work queue port for asynchronous task delivery.

use crate::task::domain::QueuedTask;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for work queue operations.
pub type WorkQueueResult<T> = Result<T, WorkQueueError>;

/// Asynchronous delivery channel for task payloads.
#[async_trait]
pub trait WorkQueue: Send + Sync {
    /// Publishes a task for later execution.
    ///
    /// Publishing is fire-and-forget: it returns once the queue has accepted
    /// the message.
    async fn publish(&self, message: &QueuedTask) -> WorkQueueResult<()>;

    /// Removes and returns up to `max` queued messages in publish order.
    async fn drain(&self, max: usize) -> WorkQueueResult<Vec<QueuedTask>>;
}

/// Errors returned by work queue adapters.
#[derive(Debug, Clone, Error)]
pub enum WorkQueueError {
    /// A message could not be encoded for the queue.
    #[error("failed to encode queue message: {0}")]
    Encoding(Arc<dyn std::error::Error + Send + Sync>),

    /// Queue backend failure.
    #[error("work queue error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl WorkQueueError {
    /// Wraps a message encoding error.
    pub fn encoding(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Encoding(Arc::new(err))
    }

    /// Wraps a queue backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
