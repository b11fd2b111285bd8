//! Port contracts for the task lifecycle.
//!
//! Ports define infrastructure-agnostic interfaces for the task record
//! store, the result cache, the work queue, and task execution.

mod cache;
mod executor;
mod queue;
mod repository;

pub use cache::{ResultCache, ResultCacheError, ResultCacheResult};
pub use executor::{
    TaskExecutor, TaskExecutorError, TaskExecutorResult, TaskHandler, TaskHandlerError,
};
pub use queue::{WorkQueue, WorkQueueError, WorkQueueResult};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
