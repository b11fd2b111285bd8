//! Domain model for the task lifecycle.
//!
//! The task domain models task identity, the `PENDING -> SUCCESS | ERROR`
//! status lifecycle, dispatch mode selection, opaque work payloads, and the
//! result view served to callers, keeping infrastructure concerns outside of
//! the domain boundary.

mod error;
mod ids;
mod payload;
mod result;
mod status;
mod task;

pub use error::{ParseTaskStatusError, TaskDomainError, TaskNotFoundError, UnsupportedModeError};
pub use ids::TaskId;
pub use payload::{QueuedTask, TaskOutput, TaskPayload};
pub use result::{STATUS_FIELD, TaskResult};
pub use status::{DispatchMode, TaskStatus};
pub use task::{ERROR_FIELD, PersistedTaskData, Task, TaskCompletion};
