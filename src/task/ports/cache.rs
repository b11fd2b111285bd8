//! Result cache port.

use crate::task::domain::TaskId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for result cache operations.
pub type ResultCacheResult<T> = Result<T, ResultCacheError>;

/// Fast keyed storage for serialized results of finished tasks.
///
/// The cache holds a disposable copy keyed by task identifier. It tracks no
/// status of its own and entries are never expired or invalidated.
#[async_trait]
pub trait ResultCache: Send + Sync {
    /// Returns the cached value for a task, or `None` on a miss.
    async fn get(&self, id: TaskId) -> ResultCacheResult<Option<String>>;

    /// Stores a serialized result for a task.
    ///
    /// Callers treat this as best-effort.
    async fn set(&self, id: TaskId, value: &str) -> ResultCacheResult<()>;
}

/// Errors returned by result cache adapters.
#[derive(Debug, Clone, Error)]
pub enum ResultCacheError {
    /// Cache backend failure.
    #[error("result cache error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl ResultCacheError {
    /// Wraps a cache backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
