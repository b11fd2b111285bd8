//! Daemon configuration from command-line flags and environment variables.

use crate::task::adapters::redis::DEFAULT_KEY_PREFIX;
use clap::Parser;
use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::time::Duration;

/// Configuration for `taskrelayd`.
///
/// Every flag can also be supplied through the environment variable named in
/// its help text. Backends absent from the configuration fall back to
/// in-memory adapters.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "taskrelayd",
    about = "Task dispatch service with a status-gated result cache"
)]
pub struct ServerConfig {
    /// Address the HTTP API listens on.
    #[arg(long, env = "TASKRELAY_LISTEN", default_value = "0.0.0.0:8888")]
    pub listen: SocketAddr,

    /// `PostgreSQL` URL for the task record store.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum number of pooled `PostgreSQL` connections.
    #[arg(long, env = "TASKRELAY_DATABASE_POOL_SIZE", default_value_t = 8)]
    pub database_pool_size: u32,

    /// Redis URL for the result cache and work queue.
    #[arg(long, env = "REDIS_URL")]
    pub redis_url: Option<String>,

    /// Prefix applied to every Redis key.
    #[arg(long, env = "TASKRELAY_REDIS_PREFIX", default_value = DEFAULT_KEY_PREFIX)]
    pub redis_prefix: String,

    /// Milliseconds between queue drain passes.
    #[arg(
        long,
        env = "TASKRELAY_POLL_INTERVAL_MS",
        default_value_t = 1000,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub poll_interval_ms: u64,

    /// Maximum number of queued tasks executed per drain pass.
    #[arg(long, env = "TASKRELAY_DRAIN_BATCH_SIZE", default_value = "32")]
    pub drain_batch_size: NonZeroUsize,
}

impl ServerConfig {
    /// Returns the queue poll interval.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
