//! When steps for result caching BDD scenarios.

use super::world::{ResultCachingWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskrelay::task::{
    domain::{TaskId, TaskPayload},
    services::CreateTaskRequest,
};

#[when(r#"a task is created in "{mode}" mode with payload '{payload}'"#)]
fn create_task(
    world: &mut ResultCachingWorld,
    mode: String,
    payload: String,
) -> Result<(), eyre::Report> {
    let document: serde_json::Value =
        serde_json::from_str(&payload).wrap_err("parse scenario payload")?;
    let request = CreateTaskRequest::new(TaskPayload::new(document)?).with_mode(mode);

    match run_async(world.app.dispatcher().create(request)) {
        Ok(task) => world.last_task = Some(task),
        Err(err) => world.last_create_error = Some(err),
    }
    Ok(())
}

#[when("the queue consumer drains pending events")]
fn drain_queue(world: &mut ResultCachingWorld) -> Result<(), eyre::Report> {
    let report = run_async(world.app.consumer().drain_pending_events(16))
        .wrap_err("drain pending queue events")?;
    eyre::ensure!(report.failed == 0, "queued execution failed: {report:?}");
    Ok(())
}

#[when("the result for the task is read {count:usize} times")]
fn read_result_repeatedly(world: &mut ResultCachingWorld, count: usize) -> Result<(), eyre::Report> {
    let id = world.task_id()?;
    for _ in 0..count {
        let resolved =
            run_async(world.app.resolver().resolve(id)).wrap_err("resolve task result")?;
        world.reads.push(resolved);
    }
    Ok(())
}

#[when("the result for an unknown task is requested")]
fn read_unknown_result(world: &mut ResultCachingWorld) {
    if let Err(err) = run_async(world.app.resolver().resolve(TaskId::new())) {
        world.last_read_error = Some(err);
    }
}
