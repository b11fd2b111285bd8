//! Background task draining the work queue on a fixed interval.

use crate::task::{
    ports::{TaskExecutor, WorkQueue},
    services::QueueConsumer,
};
use std::num::NonZeroUsize;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Handle to the spawned queue poller.
///
/// Shutdown never interrupts a drain pass in progress; the poller stops
/// before its next tick.
#[derive(Debug)]
pub struct QueuePoller {
    shutdown_tx: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl QueuePoller {
    /// Spawns a poller that drains up to `batch_size` messages every
    /// `interval`.
    ///
    /// The first pass runs immediately. Must be called from within a Tokio
    /// runtime.
    #[must_use]
    pub fn spawn<Q, E>(
        consumer: QueueConsumer<Q, E>,
        interval: Duration,
        batch_size: NonZeroUsize,
    ) -> Self
    where
        Q: WorkQueue + ?Sized + 'static,
        E: TaskExecutor + ?Sized + 'static,
    {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let join = tokio::spawn(poll_loop(consumer, interval, batch_size, shutdown_rx));
        Self { shutdown_tx, join }
    }

    /// Requests the poller to stop after the current pass.
    pub fn request_shutdown(&self) {
        if self.shutdown_tx.send(true).is_err() {
            tracing::debug!("queue poller already stopped");
        }
    }

    /// Requests shutdown and waits for the poller to exit.
    pub async fn shutdown_and_join(self) {
        self.request_shutdown();
        if let Err(err) = self.join.await {
            tracing::warn!(error = %err, "queue poller ended abnormally");
        }
    }
}

async fn poll_loop<Q, E>(
    consumer: QueueConsumer<Q, E>,
    interval: Duration,
    batch_size: NonZeroUsize,
    mut shutdown_rx: watch::Receiver<bool>,
) where
    Q: WorkQueue + ?Sized,
    E: TaskExecutor + ?Sized,
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tracing::info!(
        interval_ms = interval.as_millis(),
        batch_size = batch_size.get(),
        "queue poller started"
    );

    loop {
        tokio::select! {
            changed = shutdown_rx.changed() => {
                if changed.is_err() || *shutdown_rx.borrow() {
                    break;
                }
            }
            _ = ticker.tick() => {
                drain_once(&consumer, batch_size).await;
            }
        }
    }

    tracing::info!("queue poller stopped");
}

async fn drain_once<Q, E>(consumer: &QueueConsumer<Q, E>, batch_size: NonZeroUsize)
where
    Q: WorkQueue + ?Sized,
    E: TaskExecutor + ?Sized,
{
    match consumer.drain_pending_events(batch_size.get()).await {
        Ok(report) if report.total() > 0 => {
            tracing::debug!(
                processed = report.processed,
                failed = report.failed,
                "drained queued tasks"
            );
        }
        Ok(_) => {}
        Err(err) => tracing::warn!(error = %err, "queue drain failed"),
    }
}
