//! Shared application state wiring the task services together.

use crate::task::{
    adapters::memory::{InMemoryResultCache, InMemoryTaskRepository, InMemoryWorkQueue},
    ports::{ResultCache, TaskExecutor, TaskHandler, TaskRepository, WorkQueue},
    services::{
        HandlerExecutor, QueueConsumer, ResultResolver, TaskDispatcher, TaskLifecycleService,
    },
};
use mockable::DefaultClock;
use std::sync::Arc;

/// Lifecycle service over runtime-selected adapters.
pub type Lifecycle = TaskLifecycleService<dyn TaskRepository, DefaultClock>;

/// Dispatcher over runtime-selected adapters.
pub type Dispatcher =
    TaskDispatcher<dyn TaskRepository, dyn WorkQueue, dyn TaskExecutor, DefaultClock>;

/// Result resolver over runtime-selected adapters.
pub type Resolver = ResultResolver<dyn TaskRepository, dyn ResultCache>;

/// Queue consumer over runtime-selected adapters.
pub type Consumer = QueueConsumer<dyn WorkQueue, dyn TaskExecutor>;

/// Collaborators the task services are built from.
#[derive(Clone)]
pub struct TaskBackends {
    /// Durable task record store.
    pub repository: Arc<dyn TaskRepository>,
    /// Result cache.
    pub cache: Arc<dyn ResultCache>,
    /// Work queue for `queue` mode dispatch.
    pub queue: Arc<dyn WorkQueue>,
    /// Unit of work run for each task.
    pub handler: Arc<dyn TaskHandler>,
}

impl TaskBackends {
    /// Builds backends that keep all state in process memory.
    #[must_use]
    pub fn in_memory(handler: Arc<dyn TaskHandler>) -> Self {
        Self {
            repository: Arc::new(InMemoryTaskRepository::new()),
            cache: Arc::new(InMemoryResultCache::new()),
            queue: Arc::new(InMemoryWorkQueue::new()),
            handler,
        }
    }
}

/// State shared by all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    lifecycle: Lifecycle,
    dispatcher: Dispatcher,
    resolver: Resolver,
    queue: Arc<dyn WorkQueue>,
    executor: Arc<dyn TaskExecutor>,
}

impl AppState {
    /// Wires the task services over the given backends.
    #[must_use]
    pub fn new(backends: TaskBackends) -> Self {
        let TaskBackends {
            repository,
            cache,
            queue,
            handler,
        } = backends;
        let clock = Arc::new(DefaultClock);

        let executor: Arc<dyn TaskExecutor> = Arc::new(HandlerExecutor::new(
            Arc::clone(&repository),
            handler,
            Arc::clone(&clock),
        ));
        let lifecycle = TaskLifecycleService::new(Arc::clone(&repository), clock);
        let dispatcher = TaskDispatcher::new(
            lifecycle.clone(),
            Arc::clone(&queue),
            Arc::clone(&executor),
        );
        let resolver = ResultResolver::new(repository, cache);

        Self {
            lifecycle,
            dispatcher,
            resolver,
            queue,
            executor,
        }
    }

    /// Returns the lifecycle service.
    #[must_use]
    pub const fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// Returns the dispatcher.
    #[must_use]
    pub const fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Returns the result resolver.
    #[must_use]
    pub const fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Builds a consumer draining this state's queue through its executor.
    #[must_use]
    pub fn consumer(&self) -> Consumer {
        QueueConsumer::new(Arc::clone(&self.queue), Arc::clone(&self.executor))
    }
}
