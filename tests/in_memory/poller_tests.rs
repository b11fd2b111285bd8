//! Background queue poller tests.

use std::num::NonZeroUsize;
use std::time::Duration;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::helpers::{echo_app, in_memory_app, payload};
use async_trait::async_trait;
use serde_json::json;
use taskrelay::server::{AppState, QueuePoller};
use taskrelay::task::{
    domain::{ERROR_FIELD, TaskId, TaskOutput, TaskPayload, TaskStatus},
    ports::{TaskHandler, TaskHandlerError},
    services::{CreateTaskRequest, HANDLER_PANIC_MESSAGE},
};

/// Handler that panics on its first call and succeeds afterwards.
#[derive(Default)]
struct PanicsOnFirstCall {
    panicked: AtomicBool,
}

#[async_trait]
impl TaskHandler for PanicsOnFirstCall {
    async fn handle(
        &self,
        _task_id: TaskId,
        _payload: &TaskPayload,
    ) -> Result<TaskOutput, TaskHandlerError> {
        if !self.panicked.swap(true, Ordering::SeqCst) {
            panic!("first task handler call panics");
        }
        Ok(TaskOutput::new())
    }
}

async fn wait_for_terminal(state: &AppState, id: TaskId) -> Result<TaskStatus, eyre::Report> {
    let mut status = TaskStatus::Pending;
    for _ in 0..200 {
        status = state.lifecycle().find(id).await?.status();
        if status.is_terminal() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    Ok(status)
}

#[tokio::test(flavor = "multi_thread")]
async fn poller_completes_queued_tasks_and_stops_on_shutdown() -> Result<(), eyre::Report> {
    let app = echo_app();
    let batch = NonZeroUsize::new(8).ok_or_else(|| eyre::eyre!("non-zero batch"))?;
    let poller = QueuePoller::spawn(app.state.consumer(), Duration::from_millis(10), batch);

    let created = app
        .state
        .dispatcher()
        .create(CreateTaskRequest::new(payload(json!({"x": 1}))))
        .await?;

    let status = wait_for_terminal(&app.state, created.id()).await?;

    tokio::time::timeout(Duration::from_secs(5), poller.shutdown_and_join()).await?;
    eyre::ensure!(status == TaskStatus::Success, "expected SUCCESS, found {status}");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn shutdown_leaves_later_messages_queued() -> Result<(), eyre::Report> {
    let app = echo_app();
    let batch = NonZeroUsize::new(8).ok_or_else(|| eyre::eyre!("non-zero batch"))?;
    let poller = QueuePoller::spawn(app.state.consumer(), Duration::from_secs(3600), batch);
    tokio::time::timeout(Duration::from_secs(5), poller.shutdown_and_join()).await?;

    app.state
        .dispatcher()
        .create(CreateTaskRequest::new(payload(json!([1, 2]))))
        .await?;

    eyre::ensure!(app.queue.len()? == 1, "stopped poller must not drain");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn handler_panic_fails_the_task_and_poller_keeps_draining() -> Result<(), eyre::Report> {
    let app = in_memory_app(Arc::new(PanicsOnFirstCall::default()));
    let batch = NonZeroUsize::new(8).ok_or_else(|| eyre::eyre!("non-zero batch"))?;
    let poller = QueuePoller::spawn(app.state.consumer(), Duration::from_millis(10), batch);

    let first = app
        .state
        .dispatcher()
        .create(CreateTaskRequest::new(payload(json!({"n": 1}))))
        .await?;
    let first_status = wait_for_terminal(&app.state, first.id()).await?;
    let second = app
        .state
        .dispatcher()
        .create(CreateTaskRequest::new(payload(json!({"n": 2}))))
        .await?;
    let second_status = wait_for_terminal(&app.state, second.id()).await?;

    tokio::time::timeout(Duration::from_secs(5), poller.shutdown_and_join()).await?;
    eyre::ensure!(
        first_status == TaskStatus::Error,
        "panicking task should be ERROR, found {first_status}"
    );
    eyre::ensure!(
        second_status == TaskStatus::Success,
        "later task should still be drained, found {second_status}"
    );
    let failed = app.state.lifecycle().find(first.id()).await?;
    eyre::ensure!(
        failed.output().and_then(|output| output.get(ERROR_FIELD))
            == Some(&json!(HANDLER_PANIC_MESSAGE)),
        "panic should be recorded as the failure message"
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn handler_panic_in_process_mode_returns_error_result() -> Result<(), eyre::Report> {
    let app = in_memory_app(Arc::new(PanicsOnFirstCall::default()));

    let created = app
        .state
        .dispatcher()
        .create(CreateTaskRequest::new(payload(json!({"n": 1}))).with_mode("process"))
        .await?;
    let resolved = app.state.resolver().resolve(created.id()).await?;

    eyre::ensure!(
        resolved.body().contains("\"status\":\"ERROR\""),
        "in-line panic should resolve to ERROR, got {}",
        resolved.body()
    );
    Ok(())
}
