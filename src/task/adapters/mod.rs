//! Adapter implementations for task ports.

pub mod handler;
pub mod memory;
pub mod postgres;
pub mod redis;
