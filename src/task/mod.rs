//! Task lifecycle, dispatch, and result retrieval.
//!
//! A task is recorded as `PENDING`, dispatched once either in-line
//! (`process`) or through a work queue (`queue`), and moved to a terminal
//! status by whichever executor ran it. Results are read cache-aside, and
//! only terminal results are written to the cache. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
