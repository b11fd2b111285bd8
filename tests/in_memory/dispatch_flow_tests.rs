//! End-to-end dispatch and result resolution over in-memory adapters.

use std::sync::Arc;

use super::helpers::{FailingHandler, echo_app, in_memory_app, payload};
use serde_json::json;
use taskrelay::task::{
    domain::{TaskCompletion, TaskOutput, TaskStatus},
    ports::{ResultCache, TaskRepository},
    services::{CreateTaskRequest, ResultSource},
};
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn queued_task_stays_pending_until_consumed_then_caches() -> Result<(), eyre::Report> {
    let app = echo_app();
    let created = app
        .state
        .dispatcher()
        .create(CreateTaskRequest::new(payload(json!({"x": 1}))))
        .await?;

    let pending = app.state.resolver().resolve(created.id()).await?;
    eyre::ensure!(
        pending.body() == r#"{"status":"PENDING"}"#,
        "unexpected pending body {}",
        pending.body()
    );
    eyre::ensure!(app.cache.is_empty()?, "pending result must not be cached");
    eyre::ensure!(app.queue.len()? == 1, "task should be queued");

    let report = app.state.consumer().drain_pending_events(10).await?;
    eyre::ensure!(report.processed == 1, "expected one processed task");

    let done = app.state.resolver().resolve(created.id()).await?;
    eyre::ensure!(done.source() == ResultSource::Store, "first terminal read hits store");
    let cached = app.cache.get(created.id()).await?;
    eyre::ensure!(
        cached.as_deref() == Some(done.body()),
        "cache should hold the served body"
    );
    eyre::ensure!(
        done.body() == r#"{"status":"SUCCESS","payload":{"x":1}}"#,
        "unexpected body {}",
        done.body()
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn externally_completed_task_serves_flat_output() -> Result<(), eyre::Report> {
    let app = echo_app();
    let created = app
        .state
        .dispatcher()
        .create(CreateTaskRequest::new(payload(json!({"x": 1}))).with_mode("queue"))
        .await?;
    let output: TaskOutput = json!({"y": 2})
        .as_object()
        .cloned()
        .ok_or_else(|| eyre::eyre!("object literal"))?;

    app.state
        .lifecycle()
        .complete(created.id(), &TaskCompletion::success(output, &DefaultClock))
        .await?;
    let first = app.state.resolver().resolve(created.id()).await?;
    let second = app.state.resolver().resolve(created.id()).await?;

    eyre::ensure!(first.body() == r#"{"status":"SUCCESS","y":2}"#, "flat body");
    eyre::ensure!(first.body() == second.body(), "repeated reads are identical");
    eyre::ensure!(second.source() == ResultSource::Cache, "second read uses cache");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failing_process_task_ends_in_error_and_is_cached() -> Result<(), eyre::Report> {
    let app = in_memory_app(Arc::new(FailingHandler("unprocessable cases")));

    let created = app
        .state
        .dispatcher()
        .create(CreateTaskRequest::new(payload(json!({"x": 1}))).with_mode("process"))
        .await?;
    let stored = app
        .repository
        .find_by_id(created.id())
        .await?
        .ok_or_else(|| eyre::eyre!("record should exist"))?;
    eyre::ensure!(stored.status() == TaskStatus::Error, "task should be ERROR");
    eyre::ensure!(app.queue.is_empty()?, "process mode must not publish");

    let resolved = app.state.resolver().resolve(created.id()).await?;
    eyre::ensure!(
        resolved.body() == r#"{"status":"ERROR","error":"unprocessable cases"}"#,
        "unexpected body {}",
        resolved.body()
    );
    eyre::ensure!(app.cache.len()? == 1, "terminal result should be cached");
    Ok(())
}
