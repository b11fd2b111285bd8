//! `PostgreSQL` adapter for the task record store.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresTaskRepository, TaskPgPool};
