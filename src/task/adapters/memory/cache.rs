//! In-memory result cache.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::TaskId,
    ports::{ResultCache, ResultCacheError, ResultCacheResult},
};

/// Thread-safe in-memory result cache.
///
/// Entries live for the lifetime of the cache; nothing is expired.
#[derive(Debug, Clone, Default)]
pub struct InMemoryResultCache {
    entries: Arc<RwLock<HashMap<TaskId, String>>>,
}

impl InMemoryResultCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of cached results.
    ///
    /// # Errors
    ///
    /// Returns [`ResultCacheError::Backend`] when lock acquisition fails.
    pub fn len(&self) -> ResultCacheResult<usize> {
        let entries = self
            .entries
            .read()
            .map_err(|err| ResultCacheError::backend(std::io::Error::other(err.to_string())))?;
        Ok(entries.len())
    }

    /// Returns `true` when nothing has been cached.
    ///
    /// # Errors
    ///
    /// Returns [`ResultCacheError::Backend`] when lock acquisition fails.
    pub fn is_empty(&self) -> ResultCacheResult<bool> {
        self.len().map(|len| len == 0)
    }
}

#[async_trait]
impl ResultCache for InMemoryResultCache {
    async fn get(&self, id: TaskId) -> ResultCacheResult<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|err| ResultCacheError::backend(std::io::Error::other(err.to_string())))?;
        Ok(entries.get(&id).cloned())
    }

    async fn set(&self, id: TaskId, value: &str) -> ResultCacheResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|err| ResultCacheError::backend(std::io::Error::other(err.to_string())))?;
        entries.insert(id, value.to_owned());
        Ok(())
    }
}
