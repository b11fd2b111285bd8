//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The submitted payload is not a JSON object or array.
    #[error("task payload must be a JSON object or array, got {0}")]
    InvalidPayload(&'static str),

    /// The lifecycle does not permit the requested status change.
    #[error("invalid status transition for task {task_id}: {from} -> {to}")]
    InvalidStateTransition {
        /// Task identifier.
        task_id: TaskId,
        /// Current status.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned when a creation request names an unknown dispatch mode.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unsupported value for parameter 'type': {0}. Supported values: 'queue', 'process'")]
pub struct UnsupportedModeError(pub String);

/// Error returned when no task record exists for an identifier.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("task not found: {0}")]
pub struct TaskNotFoundError(pub TaskId);
