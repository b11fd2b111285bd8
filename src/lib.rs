//! Taskrelay: task dispatch with a status-gated result cache.
//!
//! This crate records tasks, dispatches their work either in-line or through
//! a work queue, and serves results through a cache-aside read path backed by
//! a durable record store.
//!
//! # Architecture
//!
//! Taskrelay follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, cache, queue)
//!
//! # Modules
//!
//! - [`task`]: Task lifecycle, dispatch, and result resolution
//! - [`server`]: HTTP surface, queue poller, and daemon configuration

pub mod server;
pub mod task;
