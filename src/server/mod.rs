//! HTTP surface and background processing for the task daemon.
//!
//! The router is a thin adapter over the task services; the poller drains
//! the work queue independently of request handling.

pub mod config;
mod poller;
mod response;
mod routes;
mod state;

pub use config::ServerConfig;
pub use poller::QueuePoller;
pub use response::ApiError;
pub use routes::{RESULT_SOURCE_HEADER, router};
pub use state::{AppState, Consumer, Dispatcher, Lifecycle, Resolver, TaskBackends};
