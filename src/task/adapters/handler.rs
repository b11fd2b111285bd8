//! Built-in task handler.

use crate::task::{
    domain::{TaskId, TaskOutput, TaskPayload},
    ports::{TaskHandler, TaskHandlerError},
};
use async_trait::async_trait;

/// Output field holding the echoed payload.
pub const ECHO_FIELD: &str = "payload";

/// Handler that succeeds with the submitted payload as its output.
///
/// Used by the daemon when no application handler is linked in, so queued
/// and processed tasks still reach a terminal status.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoTaskHandler;

#[async_trait]
impl TaskHandler for EchoTaskHandler {
    async fn handle(
        &self,
        _task_id: TaskId,
        payload: &TaskPayload,
    ) -> Result<TaskOutput, TaskHandlerError> {
        let mut output = TaskOutput::new();
        output.insert(ECHO_FIELD.to_owned(), payload.as_value().clone());
        Ok(output)
    }
}
