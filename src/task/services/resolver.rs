//! Cache-aside read path for task results.

use super::{TaskServiceError, TaskServiceResult};
use crate::task::{
    domain::{TaskId, TaskNotFoundError},
    ports::{ResultCache, TaskRepository},
};
use std::sync::Arc;

/// Where a resolved result body was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultSource {
    /// Served from the result cache without touching the record store.
    Cache,
    /// Read from the authoritative task record store.
    Store,
}

impl ResultSource {
    /// Returns the lowercase name of the source.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cache => "cache",
            Self::Store => "store",
        }
    }
}

/// Serialized result view returned to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedResult {
    body: String,
    source: ResultSource,
}

impl ResolvedResult {
    /// Returns the serialized JSON body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns where the body was read from.
    #[must_use]
    pub const fn source(&self) -> ResultSource {
        self.source
    }

    /// Consumes the result and returns the serialized JSON body.
    #[must_use]
    pub fn into_body(self) -> String {
        self.body
    }
}

/// Resolves task results through the cache, falling back to the record
/// store.
///
/// Only terminal results are written back to the cache. A cached entry is
/// served as-is for every later read and is never refreshed.
pub struct ResultResolver<R, Ca>
where
    R: TaskRepository + ?Sized,
    Ca: ResultCache + ?Sized,
{
    repository: Arc<R>,
    cache: Arc<Ca>,
}

impl<R, Ca> Clone for ResultResolver<R, Ca>
where
    R: TaskRepository + ?Sized,
    Ca: ResultCache + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<R, Ca> ResultResolver<R, Ca>
where
    R: TaskRepository + ?Sized,
    Ca: ResultCache + ?Sized,
{
    /// Creates a resolver over the record store and result cache.
    #[must_use]
    pub const fn new(repository: Arc<R>, cache: Arc<Ca>) -> Self {
        Self { repository, cache }
    }

    /// Returns the serialized result for a task.
    ///
    /// Cache failures never fail the read: a failed lookup is treated as a
    /// miss and a failed population is only logged.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when no record exists,
    /// [`TaskServiceError::Repository`] when the store lookup fails, or
    /// [`TaskServiceError::Encoding`] when the view cannot be serialized.
    pub async fn resolve(&self, id: TaskId) -> TaskServiceResult<ResolvedResult> {
        if let Some(body) = self.cached(id).await {
            tracing::debug!(task_id = %id, "result served from cache");
            return Ok(ResolvedResult {
                body,
                source: ResultSource::Cache,
            });
        }

        let task = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::NotFound(TaskNotFoundError(id)))?;
        let result = task.result();
        let body = serde_json::to_string(&result)?;

        if result.is_cacheable() {
            match self.cache.set(id, &body).await {
                Ok(()) => {
                    tracing::info!(task_id = %id, status = %result.status(), "cached task result");
                }
                Err(err) => {
                    tracing::warn!(task_id = %id, error = %err, "failed to cache task result");
                }
            }
        } else {
            tracing::debug!(task_id = %id, status = %result.status(), "result not cached while pending");
        }

        Ok(ResolvedResult {
            body,
            source: ResultSource::Store,
        })
    }

    async fn cached(&self, id: TaskId) -> Option<String> {
        self.cache
            .get(id)
            .await
            .inspect_err(|err| {
                tracing::warn!(task_id = %id, error = %err, "result cache lookup failed");
            })
            .ok()
            .flatten()
    }
}
