//! Task status lifecycle and dispatch mode selection.

use super::{ParseTaskStatusError, UnsupportedModeError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Task lifecycle status.
///
/// A task starts as [`TaskStatus::Pending`] and moves exactly once to one of
/// the terminal statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Work has been accepted but has not finished.
    Pending,
    /// Work finished successfully.
    Success,
    /// Work failed, including infrastructure failures during execution.
    Error,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Success => "SUCCESS",
            Self::Error => "ERROR",
        }
    }

    /// Returns `true` when no further transition may occur.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }

    /// Returns `true` when the lifecycle permits moving to `target`.
    ///
    /// Only `PENDING -> SUCCESS` and `PENDING -> ERROR` are defined.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!((self, target), (Self::Pending, Self::Success | Self::Error))
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, ParseTaskStatusError> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "PENDING" => Ok(Self::Pending),
            "SUCCESS" => Ok(Self::Success),
            "ERROR" => Ok(Self::Error),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Strategy used to execute a newly created task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    /// Publish the work to the work queue for a consumer to execute.
    #[default]
    Queue,
    /// Execute the work in-line, blocking the caller until it finishes.
    Process,
}

impl DispatchMode {
    /// Returns the mode name as accepted on the API surface.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Queue => "queue",
            Self::Process => "process",
        }
    }

    /// Resolves an optional caller-supplied mode, defaulting to
    /// [`DispatchMode::Queue`] when absent.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedModeError`] when the value names neither `queue`
    /// nor `process`.
    pub fn resolve(value: Option<&str>) -> Result<Self, UnsupportedModeError> {
        value.map_or(Ok(Self::Queue), str::parse)
    }
}

impl TryFrom<&str> for DispatchMode {
    type Error = UnsupportedModeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "queue" => Ok(Self::Queue),
            "process" => Ok(Self::Process),
            _ => Err(UnsupportedModeError(value.to_owned())),
        }
    }
}

impl FromStr for DispatchMode {
    type Err = UnsupportedModeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::try_from(value)
    }
}

impl fmt::Display for DispatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
