//! In-memory integration tests for owner isolation.

use super::helpers::{Store, create_subtask, create_task, owner, store};
use rstest::rstest;
use taskboard::task::{
    domain::OwnerId,
    services::{
        ChangeStatusRequest, CreateSubtaskRequest, TaskErrorKind, TaskLifecycleError,
        TaskListQuery, UpdateTaskRequest,
    },
};

fn expect_not_found<T: std::fmt::Debug>(
    result: Result<T, TaskLifecycleError>,
    operation: &str,
) -> Result<(), eyre::Report> {
    match result {
        Err(err) if err.kind() == TaskErrorKind::NotFound => Ok(()),
        other => Err(eyre::eyre!("{operation}: wanted not found, got {other:?}")),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn other_owners_cannot_touch_tasks(store: Store, owner: OwnerId) -> Result<(), eyre::Report> {
    let service = &store.service;
    let task = create_task(service, owner, "Private diary").await?;
    create_subtask(service, owner, &task, "Buy a lock").await?;
    let stranger = OwnerId::new();

    expect_not_found(service.find_task(stranger, task.id()).await, "find")?;
    expect_not_found(
        service.find_task_with_subtasks(stranger, task.id()).await,
        "detail",
    )?;
    expect_not_found(
        service
            .update_task(
                stranger,
                UpdateTaskRequest::new(task.id()).with_title("Mine"),
            )
            .await,
        "update",
    )?;
    expect_not_found(
        service
            .change_status(stranger, ChangeStatusRequest::new(task.id(), "DONE"))
            .await,
        "status",
    )?;
    expect_not_found(service.advance_status(stranger, task.id()).await, "advance")?;
    expect_not_found(
        service
            .create_subtask(stranger, CreateSubtaskRequest::new(task.id(), "Sneak in"))
            .await,
        "subtask",
    )?;
    expect_not_found(service.delete_task(stranger, task.id()).await, "delete")?;

    let theirs = service.list_tasks(stranger, &TaskListQuery::new()).await?;
    eyre::ensure!(theirs.is_empty(), "stranger should see no tasks");
    eyre::ensure!(store.repository.len()? == 2, "nothing should change");
    let unchanged = service.find_task(owner, task.id()).await?;
    eyre::ensure!(unchanged == task, "owner's task was modified");
    Ok(())
}
