//! Task aggregate root and terminal completion values.

use super::{TaskDomainError, TaskId, TaskOutput, TaskResult, TaskStatus};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Output key used for the failure message of an `ERROR` task.
pub const ERROR_FIELD: &str = "error";

/// Terminal outcome recorded by the executor that ran a task.
///
/// A completion always carries a terminal status, so a task can never be
/// "completed" back into `PENDING`.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskCompletion {
    status: TaskStatus,
    output: TaskOutput,
    completed_at: DateTime<Utc>,
}

impl TaskCompletion {
    /// Creates a successful completion carrying the produced output.
    #[must_use]
    pub fn success(output: TaskOutput, clock: &impl Clock) -> Self {
        Self {
            status: TaskStatus::Success,
            output,
            completed_at: clock.utc(),
        }
    }

    /// Creates a failed completion carrying a human-readable message.
    #[must_use]
    pub fn failure(message: impl Into<String>, clock: &impl Clock) -> Self {
        let mut output = TaskOutput::new();
        output.insert(ERROR_FIELD.to_owned(), Value::String(message.into()));
        Self {
            status: TaskStatus::Error,
            output,
            completed_at: clock.utc(),
        }
    }

    /// Returns the terminal status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the output fields.
    #[must_use]
    pub const fn output(&self) -> &TaskOutput {
        &self.output
    }

    /// Returns when the executor finished.
    #[must_use]
    pub const fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    output: Option<TaskOutput>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted output, present once the task is terminal.
    pub output: Option<TaskOutput>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new `PENDING` task with a freshly allocated identifier.
    #[must_use]
    pub fn new(clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            status: TaskStatus::Pending,
            output: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            status: data.status,
            output: data.output,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the recorded output, if the task has finished.
    #[must_use]
    pub const fn output(&self) -> Option<&TaskOutput> {
        self.output.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies the single terminal transition.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] when the task is
    /// already terminal. The task is left unchanged.
    pub fn complete(&mut self, completion: &TaskCompletion) -> Result<(), TaskDomainError> {
        if !self.status.can_transition_to(completion.status()) {
            return Err(TaskDomainError::InvalidStateTransition {
                task_id: self.id,
                from: self.status,
                to: completion.status(),
            });
        }
        self.status = completion.status();
        self.output = Some(completion.output().clone());
        self.updated_at = completion.completed_at();
        Ok(())
    }

    /// Returns the result view served to callers.
    #[must_use]
    pub fn result(&self) -> TaskResult {
        TaskResult::new(self.status, self.output.clone().unwrap_or_default())
    }
}
