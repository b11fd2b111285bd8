//! `taskrelayd`: HTTP daemon recording, dispatching, and serving tasks.
//!
//! Usage:
//!
//! ```text
//! taskrelayd [--listen <addr>] [--database-url <url>] [--redis-url <url>]
//! ```
//!
//! Without `DATABASE_URL` task records live in memory; without `REDIS_URL`
//! the result cache and work queue do too. Logging honours `RUST_LOG`.

use anyhow::Context;
use clap::Parser;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use std::sync::Arc;
use taskrelay::server::{AppState, QueuePoller, ServerConfig, TaskBackends, router};
use taskrelay::task::adapters::{
    handler::EchoTaskHandler,
    memory::{InMemoryResultCache, InMemoryTaskRepository, InMemoryWorkQueue},
    postgres::{PostgresTaskRepository, TaskPgPool},
    redis::{RedisResultCache, RedisWorkQueue, connect},
};
use taskrelay::task::ports::{ResultCache, TaskRepository, WorkQueue};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = ServerConfig::parse();

    let repository = open_repository(&config).await?;
    let (cache, queue) = open_cache_and_queue(&config).await?;
    let state = AppState::new(TaskBackends {
        repository,
        cache,
        queue,
        handler: Arc::new(EchoTaskHandler),
    });

    let poller = QueuePoller::spawn(
        state.consumer(),
        config.poll_interval(),
        config.drain_batch_size,
    );

    let listener = TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("failed to bind {}", config.listen))?;
    info!(listen = %config.listen, "taskrelayd listening");

    let served = axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await;

    poller.shutdown_and_join().await;
    served.context("HTTP server failed")?;
    info!("taskrelayd stopped");
    Ok(())
}

async fn open_repository(config: &ServerConfig) -> anyhow::Result<Arc<dyn TaskRepository>> {
    let Some(url) = config.database_url.clone() else {
        warn!("DATABASE_URL not set; task records are kept in memory");
        return Ok(Arc::new(InMemoryTaskRepository::new()));
    };

    let pool_size = config.database_pool_size;
    let pool: TaskPgPool = tokio::task::spawn_blocking(move || {
        Pool::builder()
            .max_size(pool_size)
            .build(ConnectionManager::<PgConnection>::new(url))
    })
    .await
    .context("database pool setup was cancelled")?
    .context("failed to connect to PostgreSQL")?;

    let repository = PostgresTaskRepository::new(pool);
    repository
        .ensure_schema()
        .await
        .context("failed to prepare the tasks table")?;
    info!(pool_size, "using PostgreSQL task store");
    Ok(Arc::new(repository))
}

async fn open_cache_and_queue(
    config: &ServerConfig,
) -> anyhow::Result<(Arc<dyn ResultCache>, Arc<dyn WorkQueue>)> {
    let Some(url) = config.redis_url.as_deref() else {
        warn!("REDIS_URL not set; result cache and work queue are kept in memory");
        return Ok((
            Arc::new(InMemoryResultCache::new()),
            Arc::new(InMemoryWorkQueue::new()),
        ));
    };

    let conn = connect(url).await.context("failed to connect to Redis")?;
    let cache = RedisResultCache::new(conn.clone()).with_prefix(config.redis_prefix.clone());
    let queue = RedisWorkQueue::new(conn).with_prefix(config.redis_prefix.clone());
    info!(prefix = %config.redis_prefix, "using Redis result cache and work queue");
    Ok((Arc::new(cache), Arc::new(queue)))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for ctrl-c; running until killed");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
