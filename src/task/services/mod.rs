//! Application services for task lifecycle orchestration.

mod consumer;
mod dispatch;
mod error;
mod executor;
mod lifecycle;
mod resolver;

pub use consumer::{DrainReport, QueueConsumer};
pub use dispatch::{CreateTaskRequest, TaskDispatcher};
pub use error::{DispatchFailure, TaskServiceError, TaskServiceResult};
pub use executor::{HANDLER_CANCELLED_MESSAGE, HANDLER_PANIC_MESSAGE, HandlerExecutor};
pub use lifecycle::TaskLifecycleService;
pub use resolver::{ResolvedResult, ResultResolver, ResultSource};
