//! In-memory adapters for the task record store, result cache, and work
//! queue.
//!
//! These adapters back unit and integration tests and single-process
//! deployments without external services.

mod cache;
mod queue;
mod task;

pub use cache::InMemoryResultCache;
pub use queue::InMemoryWorkQueue;
pub use task::InMemoryTaskRepository;
