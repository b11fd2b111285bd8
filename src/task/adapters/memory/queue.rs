//! In-process work queue.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::task::{
    domain::QueuedTask,
    ports::{WorkQueue, WorkQueueError, WorkQueueResult},
};

/// FIFO work queue held in process memory.
///
/// Messages are lost when the process exits. The lock is never held across
/// an await point.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkQueue {
    messages: Arc<Mutex<VecDeque<QueuedTask>>>,
}

impl InMemoryWorkQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of messages waiting to be drained.
    ///
    /// # Errors
    ///
    /// Returns [`WorkQueueError::Backend`] when lock acquisition fails.
    pub fn len(&self) -> WorkQueueResult<usize> {
        let messages = self
            .messages
            .lock()
            .map_err(|err| WorkQueueError::backend(std::io::Error::other(err.to_string())))?;
        Ok(messages.len())
    }

    /// Returns `true` when no messages are waiting.
    ///
    /// # Errors
    ///
    /// Returns [`WorkQueueError::Backend`] when lock acquisition fails.
    pub fn is_empty(&self) -> WorkQueueResult<bool> {
        self.len().map(|len| len == 0)
    }
}

#[async_trait]
impl WorkQueue for InMemoryWorkQueue {
    async fn publish(&self, message: &QueuedTask) -> WorkQueueResult<()> {
        let mut messages = self
            .messages
            .lock()
            .map_err(|err| WorkQueueError::backend(std::io::Error::other(err.to_string())))?;
        messages.push_back(message.clone());
        Ok(())
    }

    async fn drain(&self, max: usize) -> WorkQueueResult<Vec<QueuedTask>> {
        let mut messages = self
            .messages
            .lock()
            .map_err(|err| WorkQueueError::backend(std::io::Error::other(err.to_string())))?;
        let count = max.min(messages.len());
        Ok(messages.drain(..count).collect())
    }
}
