//! Shared helpers for in-memory integration tests.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use taskrelay::server::{AppState, TaskBackends};
use taskrelay::task::{
    adapters::handler::EchoTaskHandler,
    adapters::memory::{InMemoryResultCache, InMemoryTaskRepository, InMemoryWorkQueue},
    domain::{TaskId, TaskOutput, TaskPayload},
    ports::{TaskHandler, TaskHandlerError},
};

/// Handles of the in-memory adapters behind an [`AppState`].
pub struct InMemoryApp {
    pub state: AppState,
    pub repository: Arc<InMemoryTaskRepository>,
    pub cache: Arc<InMemoryResultCache>,
    pub queue: Arc<InMemoryWorkQueue>,
}

/// Builds application state over fresh in-memory adapters.
pub fn in_memory_app(handler: Arc<dyn TaskHandler>) -> InMemoryApp {
    let repository = Arc::new(InMemoryTaskRepository::new());
    let cache = Arc::new(InMemoryResultCache::new());
    let queue = Arc::new(InMemoryWorkQueue::new());
    let state = AppState::new(TaskBackends {
        repository: repository.clone(),
        cache: cache.clone(),
        queue: queue.clone(),
        handler,
    });
    InMemoryApp {
        state,
        repository,
        cache,
        queue,
    }
}

/// Builds application state whose handler echoes the payload.
pub fn echo_app() -> InMemoryApp {
    in_memory_app(Arc::new(EchoTaskHandler))
}

/// Builds a payload from a JSON document.
pub fn payload(document: Value) -> TaskPayload {
    TaskPayload::new(document).expect("structured payload")
}

/// Handler that fails every task with a fixed message.
pub struct FailingHandler(pub &'static str);

#[async_trait]
impl TaskHandler for FailingHandler {
    async fn handle(
        &self,
        _task_id: TaskId,
        _payload: &TaskPayload,
    ) -> Result<TaskOutput, TaskHandlerError> {
        Err(TaskHandlerError::new(self.0))
    }
}
