//! Work payloads submitted with task creation requests.

use super::{TaskDomainError, TaskId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Output fields produced by a finished task.
pub type TaskOutput = Map<String, Value>;

/// Validated work payload.
///
/// The payload is opaque to the task lifecycle: it is handed unchanged to
/// whichever executor runs the task and is never persisted with the task
/// record. Only JSON objects and arrays are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct TaskPayload(Value);

impl TaskPayload {
    /// Creates a validated payload.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidPayload`] when the value is a JSON
    /// scalar or `null`.
    pub fn new(value: Value) -> Result<Self, TaskDomainError> {
        match value {
            Value::Object(_) | Value::Array(_) => Ok(Self(value)),
            Value::Null => Err(TaskDomainError::InvalidPayload("null")),
            Value::Bool(_) => Err(TaskDomainError::InvalidPayload("boolean")),
            Value::Number(_) => Err(TaskDomainError::InvalidPayload("number")),
            Value::String(_) => Err(TaskDomainError::InvalidPayload("string")),
        }
    }

    /// Returns the payload as a JSON value.
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consumes the payload and returns the JSON value.
    #[must_use]
    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl TryFrom<Value> for TaskPayload {
    type Error = TaskDomainError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskPayload> for Value {
    fn from(payload: TaskPayload) -> Self {
        payload.0
    }
}

/// Message carried by the work queue: a task identity and its payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueuedTask {
    task_id: TaskId,
    payload: TaskPayload,
}

impl QueuedTask {
    /// Creates a queue message.
    #[must_use]
    pub const fn new(task_id: TaskId, payload: TaskPayload) -> Self {
        Self { task_id, payload }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the work payload.
    #[must_use]
    pub const fn payload(&self) -> &TaskPayload {
        &self.payload
    }
}
