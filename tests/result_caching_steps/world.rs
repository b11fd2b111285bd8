//! Shared world state for result caching BDD scenarios.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rstest::fixture;
use taskrelay::server::{AppState, TaskBackends};
use taskrelay::task::{
    adapters::memory::{InMemoryResultCache, InMemoryTaskRepository, InMemoryWorkQueue},
    domain::{Task, TaskId, TaskOutput, TaskPayload},
    ports::{TaskHandler, TaskHandlerError},
    services::{ResolvedResult, TaskServiceError},
};

/// Handler whose outcome is chosen by scenario steps.
pub struct ScriptedHandler {
    outcome: Mutex<Result<TaskOutput, String>>,
    calls: AtomicUsize,
}

impl ScriptedHandler {
    fn new() -> Self {
        Self {
            outcome: Mutex::new(Ok(TaskOutput::new())),
            calls: AtomicUsize::new(0),
        }
    }

    /// Makes the handler succeed with `output`.
    pub fn succeed_with(&self, output: TaskOutput) {
        if let Ok(mut outcome) = self.outcome.lock() {
            *outcome = Ok(output);
        }
    }

    /// Makes the handler fail with `message`.
    pub fn fail_with(&self, message: String) {
        if let Ok(mut outcome) = self.outcome.lock() {
            *outcome = Err(message);
        }
    }

    /// Returns how many times the handler ran.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TaskHandler for ScriptedHandler {
    async fn handle(
        &self,
        _task_id: TaskId,
        _payload: &TaskPayload,
    ) -> Result<TaskOutput, TaskHandlerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let outcome = self
            .outcome
            .lock()
            .map_err(|err| TaskHandlerError::new(err.to_string()))?
            .clone();
        outcome.map_err(TaskHandlerError::new)
    }
}

/// Scenario world for result caching behaviour tests.
pub struct ResultCachingWorld {
    pub app: AppState,
    pub repository: Arc<InMemoryTaskRepository>,
    pub cache: Arc<InMemoryResultCache>,
    pub queue: Arc<InMemoryWorkQueue>,
    pub handler: Arc<ScriptedHandler>,
    pub last_task: Option<Task>,
    pub last_create_error: Option<TaskServiceError>,
    pub reads: Vec<ResolvedResult>,
    pub last_read_error: Option<TaskServiceError>,
}

impl ResultCachingWorld {
    /// Creates a world over fresh in-memory backends.
    #[must_use]
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryTaskRepository::new());
        let cache = Arc::new(InMemoryResultCache::new());
        let queue = Arc::new(InMemoryWorkQueue::new());
        let handler = Arc::new(ScriptedHandler::new());
        let app = AppState::new(TaskBackends {
            repository: repository.clone(),
            cache: cache.clone(),
            queue: queue.clone(),
            handler: handler.clone(),
        });

        Self {
            app,
            repository,
            cache,
            queue,
            handler,
            last_task: None,
            last_create_error: None,
            reads: Vec::new(),
            last_read_error: None,
        }
    }

    /// Returns the identifier of the task created in this scenario.
    pub fn task_id(&self) -> Result<TaskId, eyre::Report> {
        self.last_task
            .as_ref()
            .map(Task::id)
            .ok_or_else(|| eyre::eyre!("missing created task in scenario world"))
    }
}

impl Default for ResultCachingWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ResultCachingWorld {
    ResultCachingWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Parses a JSON object literal used in scenario text.
pub fn json_object(raw: &str) -> Result<TaskOutput, eyre::Report> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    value
        .as_object()
        .cloned()
        .ok_or_else(|| eyre::eyre!("expected a JSON object, got {raw}"))
}
