//! Result view of a task as served by the result read path.

use super::{TaskOutput, TaskStatus};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Key carrying the task status in a serialized result.
pub const STATUS_FIELD: &str = "status";

/// Current status of a task plus any output it produced.
///
/// Serializes as a flat JSON object with `status` first, for example
/// `{"status":"SUCCESS","y":2}`. An output field named `status` is never
/// emitted, so the authoritative status cannot be overridden by task output.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskResult {
    status: TaskStatus,
    output: TaskOutput,
}

impl TaskResult {
    /// Creates a result view.
    #[must_use]
    pub const fn new(status: TaskStatus, output: TaskOutput) -> Self {
        Self { status, output }
    }

    /// Returns the task status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the output fields.
    #[must_use]
    pub const fn output(&self) -> &TaskOutput {
        &self.output
    }

    /// Returns `true` when this view may be written to the result cache.
    ///
    /// Only terminal results are immutable.
    #[must_use]
    pub const fn is_cacheable(&self) -> bool {
        self.status.is_terminal()
    }
}

impl Serialize for TaskResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(STATUS_FIELD, &self.status)?;
        for (key, value) in self
            .output
            .iter()
            .filter(|(key, _)| key.as_str() != STATUS_FIELD)
        {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
