//! Then steps for task status BDD scenarios.

use super::world::{TaskStatusWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::then;
use taskboard::task::{domain::TaskStatus, services::TaskLifecycleError};

fn expected_status(raw: &str) -> Result<TaskStatus, eyre::Report> {
    TaskStatus::try_from(raw).wrap_err("invalid expected status in scenario")
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskStatusWorld, status: String) -> Result<(), eyre::Report> {
    let expected = expected_status(&status)?;
    let task = world.task()?;

    eyre::ensure!(
        task.status() == expected,
        "expected status {expected}, found {}",
        task.status()
    );
    Ok(())
}

#[then("the task has a completion time")]
fn task_has_completion_time(world: &TaskStatusWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world.task()?.completed_at().is_some(),
        "expected a completion time"
    );
    Ok(())
}

#[then("the task has no completion time")]
fn task_has_no_completion_time(world: &TaskStatusWorld) -> Result<(), eyre::Report> {
    let completed_at = world.task()?.completed_at();
    eyre::ensure!(
        completed_at.is_none(),
        "expected no completion time, found {completed_at:?}"
    );
    Ok(())
}

#[then("the status change fails with an invalid status error")]
fn status_change_fails(world: &TaskStatusWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_status_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing status change result"))?;

    if !matches!(result, Err(TaskLifecycleError::InvalidStatus(_))) {
        eyre::bail!("expected InvalidStatus error, got {result:?}");
    }
    Ok(())
}

#[then(r#"the stored task status is "{status}""#)]
fn stored_task_status_is(world: &TaskStatusWorld, status: String) -> Result<(), eyre::Report> {
    let expected = expected_status(&status)?;
    let task_id = world.task()?.id();
    let stored = run_async(world.service.find_task(world.owner, task_id))?;

    eyre::ensure!(
        stored.status() == expected,
        "expected stored status {expected}, found {}",
        stored.status()
    );
    eyre::ensure!(
        stored.completed_at().is_none(),
        "unexpected completion time"
    );
    Ok(())
}
