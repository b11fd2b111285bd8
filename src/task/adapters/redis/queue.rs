//! Redis list-backed work queue.

use super::DEFAULT_KEY_PREFIX;
use crate::task::{
    domain::QueuedTask,
    ports::{WorkQueue, WorkQueueError, WorkQueueResult},
};
use ::redis::AsyncCommands;
use ::redis::aio::MultiplexedConnection;
use async_trait::async_trait;
use std::num::NonZeroUsize;

/// Work queue publishing JSON messages onto a single Redis list.
///
/// Messages are appended with `RPUSH` and drained from the head with a
/// counted `LPOP`, preserving publish order.
#[derive(Debug, Clone)]
pub struct RedisWorkQueue {
    conn: MultiplexedConnection,
    key_prefix: String,
}

impl RedisWorkQueue {
    /// Creates a queue over an established connection with the default key
    /// prefix.
    #[must_use]
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self {
            conn,
            key_prefix: DEFAULT_KEY_PREFIX.to_owned(),
        }
    }

    /// Sets a custom key prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    fn queue_key(&self) -> String {
        format!("{}:queue", self.key_prefix)
    }
}

#[async_trait]
impl WorkQueue for RedisWorkQueue {
    async fn publish(&self, message: &QueuedTask) -> WorkQueueResult<()> {
        let encoded = serde_json::to_string(message).map_err(WorkQueueError::encoding)?;
        let mut conn = self.conn.clone();
        conn.rpush::<_, _, ()>(self.queue_key(), encoded)
            .await
            .map_err(WorkQueueError::backend)
    }

    async fn drain(&self, max: usize) -> WorkQueueResult<Vec<QueuedTask>> {
        let Some(count) = NonZeroUsize::new(max) else {
            return Ok(Vec::new());
        };
        let mut conn = self.conn.clone();
        let raw = conn
            .lpop::<_, Option<Vec<String>>>(self.queue_key(), Some(count))
            .await
            .map_err(WorkQueueError::backend)?;
        Ok(decode_messages(raw.unwrap_or_default()))
    }
}

/// Decodes popped list entries, dropping any that are not valid messages.
///
/// A popped entry has already left the list, so a malformed one is logged
/// and skipped rather than failing the whole batch.
fn decode_messages(raw: Vec<String>) -> Vec<QueuedTask> {
    raw.into_iter()
        .filter_map(|entry| match serde_json::from_str::<QueuedTask>(&entry) {
            Ok(message) => Some(message),
            Err(err) => {
                tracing::warn!(error = %err, "discarding malformed queue message");
                None
            }
        })
        .collect()
}
