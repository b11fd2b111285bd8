//! Redis-backed result cache.

use super::DEFAULT_KEY_PREFIX;
use crate::task::{
    domain::TaskId,
    ports::{ResultCache, ResultCacheError, ResultCacheResult},
};
use ::redis::AsyncCommands;
use ::redis::aio::MultiplexedConnection;
use async_trait::async_trait;

/// Result cache storing serialized views as plain Redis strings.
///
/// Entries are written without a TTL since a finished result never changes.
#[derive(Debug, Clone)]
pub struct RedisResultCache {
    conn: MultiplexedConnection,
    key_prefix: String,
}

impl RedisResultCache {
    /// Creates a cache over an established connection with the default
    /// key prefix.
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

    fn result_key(&self, id: TaskId) -> String {
        result_key(&self.key_prefix, id)
    }
}

#[async_trait]
impl ResultCache for RedisResultCache {
    async fn get(&self, id: TaskId) -> ResultCacheResult<Option<String>> {
        let mut conn = self.conn.clone();
        conn.get::<_, Option<String>>(self.result_key(id))
            .await
            .map_err(ResultCacheError::backend)
    }

    async fn set(&self, id: TaskId, value: &str) -> ResultCacheResult<()> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(self.result_key(id), value)
            .await
            .map_err(ResultCacheError::backend)
    }
}

fn result_key(prefix: &str, id: TaskId) -> String {
    format!("{prefix}:result:{id}")
}
