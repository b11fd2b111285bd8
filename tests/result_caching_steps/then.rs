//! Then steps for result caching BDD scenarios.

use super::world::{ResultCachingWorld, run_async};
use rstest_bdd_macros::then;
use taskrelay::task::{
    domain::TaskStatus,
    ports::ResultCache,
    services::{ResultSource, TaskServiceError},
};

#[then(r#"the created task is "{status}""#)]
fn created_task_is(world: &ResultCachingWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task = world
        .last_task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing created task"))?;
    eyre::ensure!(
        task.status() == expected,
        "expected {expected}, found {}",
        task.status()
    );
    Ok(())
}

#[then("the result for the task is '{body}'")]
fn result_is(world: &ResultCachingWorld, body: String) -> Result<(), eyre::Report> {
    let id = world.task_id()?;
    let resolved = run_async(world.app.resolver().resolve(id))?;
    eyre::ensure!(
        resolved.body() == body,
        "expected result {body}, found {}",
        resolved.body()
    );
    Ok(())
}

#[then("the result cache has no entry for the task")]
fn cache_has_no_entry(world: &ResultCachingWorld) -> Result<(), eyre::Report> {
    let id = world.task_id()?;
    let cached = run_async(world.cache.get(id))?;
    eyre::ensure!(cached.is_none(), "unexpected cache entry {cached:?}");
    Ok(())
}

#[then("the result cache holds '{body}' for the task")]
fn cache_holds(world: &ResultCachingWorld, body: String) -> Result<(), eyre::Report> {
    let id = world.task_id()?;
    let cached = run_async(world.cache.get(id))?;
    eyre::ensure!(
        cached.as_deref() == Some(body.as_str()),
        "expected cached {body}, found {cached:?}"
    );
    Ok(())
}

#[then(r#"creation fails with an unsupported mode error naming "{mode}""#)]
fn creation_fails_with_unsupported_mode(
    world: &ResultCachingWorld,
    mode: String,
) -> Result<(), eyre::Report> {
    let err = world
        .last_create_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected creation to fail"))?;
    let TaskServiceError::UnsupportedMode(unsupported) = err else {
        return Err(eyre::eyre!("expected UnsupportedMode error, got {err:?}"));
    };
    eyre::ensure!(unsupported.0 == mode, "error names {}", unsupported.0);
    Ok(())
}

#[then("nothing was queued or executed")]
fn nothing_dispatched(world: &ResultCachingWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(world.queue.is_empty()?, "queue should be empty");
    eyre::ensure!(world.handler.calls() == 0, "handler should not run");
    Ok(())
}

#[then(r#"exactly one "{status}" task record exists"#)]
fn one_record_exists(world: &ResultCachingWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let records = run_async(world.app.lifecycle().list(None))?;
    eyre::ensure!(records.len() == 1, "expected one record, found {}", records.len());
    eyre::ensure!(
        records.iter().all(|task| task.status() == expected),
        "record should be {expected}"
    );
    Ok(())
}

#[then("every read returned the same body")]
fn reads_identical(world: &ResultCachingWorld) -> Result<(), eyre::Report> {
    let first = world
        .reads
        .first()
        .ok_or_else(|| eyre::eyre!("no reads recorded"))?;
    eyre::ensure!(
        world.reads.iter().all(|read| read.body() == first.body()),
        "reads differ"
    );
    Ok(())
}

#[then("only the first read came from the record store")]
fn only_first_read_from_store(world: &ResultCachingWorld) -> Result<(), eyre::Report> {
    let sources: Vec<ResultSource> = world.reads.iter().map(|read| read.source()).collect();
    let (first, rest) = sources
        .split_first()
        .ok_or_else(|| eyre::eyre!("no reads recorded"))?;
    eyre::ensure!(*first == ResultSource::Store, "first read came from {first:?}");
    eyre::ensure!(
        rest.iter().all(|source| *source == ResultSource::Cache),
        "later reads came from {rest:?}"
    );
    Ok(())
}

#[then("the result lookup fails with task not found")]
fn lookup_not_found(world: &ResultCachingWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(
        matches!(world.last_read_error, Some(TaskServiceError::NotFound(_))),
        "expected NotFound, got {:?}",
        world.last_read_error
    );
    Ok(())
}
