//! `PostgreSQL` round-trip tests for task fields and completion times.

use super::helpers::{PgContext, create_task, owner, persisted_task, pg_context};
use rstest::rstest;
use taskboard::task::{
    domain::{OwnerId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
    services::{ChangeStatusRequest, CreateSubtaskRequest, CreateTaskRequest, UpdateTaskRequest},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stored_tasks_come_back_unchanged(
    pg_context: Result<Option<PgContext>, eyre::Report>,
    owner: OwnerId,
) -> Result<(), eyre::Report> {
    let Some(context) = pg_context? else {
        return Ok(());
    };
    let parent = context
        .service
        .create_task(
            owner,
            CreateTaskRequest::new("Renew passport")
                .with_description("Bring two photos")
                .with_priority("HIGH")
                .with_due_date("2025-03-01"),
        )
        .await?;
    let child = context
        .service
        .create_subtask(
            owner,
            CreateSubtaskRequest::new(parent.id(), "Book photo booth")
                .with_priority("LOW"),
        )
        .await?;

    for expected in [&parent, &child] {
        let found = context.repository.find_by_id(owner, expected.id()).await?;
        eyre::ensure!(
            found.as_ref() == Some(expected),
            "round trip changed {}: {found:?}",
            expected.title()
        );
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completion_time_follows_status(
    pg_context: Result<Option<PgContext>, eyre::Report>,
    owner: OwnerId,
) -> Result<(), eyre::Report> {
    let Some(context) = pg_context? else {
        return Ok(());
    };
    let service = &context.service;
    let task = create_task(service, owner, "File tax return").await?;

    let done = service
        .change_status(owner, ChangeStatusRequest::new(task.id(), "DONE"))
        .await?;
    let stored = context.repository.find_by_id(owner, task.id()).await?;
    eyre::ensure!(stored.as_ref() == Some(&done), "done task not persisted");
    eyre::ensure!(done.completed_at().is_some(), "done task lacks completion");

    let edited = service
        .update_task(
            owner,
            UpdateTaskRequest::new(task.id()).with_title("File taxes"),
        )
        .await?;
    eyre::ensure!(
        edited.completed_at() == done.completed_at(),
        "field edits must not touch the completion time"
    );

    let reopened = service
        .change_status(owner, ChangeStatusRequest::new(task.id(), "IN_PROGRESS"))
        .await?;
    let Some(stored) = context.repository.find_by_id(owner, task.id()).await? else {
        eyre::bail!("reopened task missing");
    };
    eyre::ensure!(stored == reopened, "reopened task not persisted");
    eyre::ensure!(
        stored.status() == TaskStatus::InProgress && stored.completed_at().is_none(),
        "leaving DONE must clear the stored completion time"
    );

    let redone = service.advance_status(owner, task.id()).await?;
    eyre::ensure!(
        redone.completed_at() > done.completed_at(),
        "completing again must record a fresh time"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn storing_the_same_task_twice_is_rejected(
    pg_context: Result<Option<PgContext>, eyre::Report>,
    owner: OwnerId,
) -> Result<(), eyre::Report> {
    let Some(context) = pg_context? else {
        return Ok(());
    };
    let task = create_task(&context.service, owner, "Water plants").await?;

    let result = context.repository.store(&task).await;

    let Err(TaskRepositoryError::DuplicateTask(id)) = result else {
        eyre::bail!("expected duplicate error, got {result:?}");
    };
    eyre::ensure!(id == task.id(), "duplicate reported for {id}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn table_rejects_done_without_completion_time(
    pg_context: Result<Option<PgContext>, eyre::Report>,
    owner: OwnerId,
) -> Result<(), eyre::Report> {
    let Some(context) = pg_context? else {
        return Ok(());
    };
    let inconsistent = persisted_task(owner, None, "Half finished", TaskStatus::Done, None)?;

    let result = context.repository.store(&inconsistent).await;

    eyre::ensure!(
        matches!(result, Err(TaskRepositoryError::Persistence(_))),
        "expected a constraint failure, got {result:?}"
    );
    let stored = context.repository.find_by_id(owner, inconsistent.id()).await?;
    eyre::ensure!(stored.is_none(), "rejected row must not be stored");
    Ok(())
}
