//! Redis adapters for the result cache and the work queue.
//!
//! Both adapters share a [`MultiplexedConnection`], which clones cheaply onto
//! the same TCP connection, and a key prefix that namespaces every key they
//! touch:
//!
//! | Key Pattern | Type | Purpose |
//! |-------------|------|---------|
//! | `{prefix}:result:{task_id}` | String | Serialized result view |
//! | `{prefix}:queue` | List | Pending queue messages (`RPUSH`/`LPOP`) |

mod cache;
mod queue;

use ::redis::RedisResult;
use ::redis::aio::MultiplexedConnection;

pub use cache::RedisResultCache;
pub use queue::RedisWorkQueue;

/// Key prefix used when none is configured.
pub const DEFAULT_KEY_PREFIX: &str = "taskrelay";

/// Opens a multiplexed connection to the Redis server at `url`.
///
/// The URL format is `redis://[:<password>@]<host>:<port>[/<db>]`.
///
/// # Errors
///
/// Returns the Redis error when the URL is malformed or the server cannot be
/// reached.
pub async fn connect(url: &str) -> RedisResult<MultiplexedConnection> {
    let client = ::redis::Client::open(url)?;
    client.get_multiplexed_async_connection().await
}
