//! Step definitions for result caching behaviour scenarios.

pub mod then;
pub mod when;
pub mod world;
