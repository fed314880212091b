//! Repository port for owner-scoped task persistence.

use crate::task::domain::{OwnerId, Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Which of an owner's tasks a listing returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskScope {
    /// Every task, top-level and subtasks alike.
    #[default]
    All,
    /// Only tasks without a parent.
    TopLevel,
    /// Only the direct subtasks of the given parent.
    ChildrenOf(TaskId),
}

impl TaskScope {
    /// Returns `true` when `task` falls inside this scope.
    #[must_use]
    pub fn includes(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::TopLevel => !task.is_subtask(),
            Self::ChildrenOf(parent_id) => task.parent_id() == Some(parent_id),
        }
    }
}

/// Task persistence contract.
///
/// Every read and write is scoped to an owner: a task owned by someone else
/// behaves exactly like a missing one.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task (fields, status, timestamps).
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when no task with this ID
    /// exists for the task's owner.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier within an owner's tasks.
    ///
    /// Returns `None` when the task does not exist or belongs to another owner.
    async fn find_by_id(&self, owner_id: OwnerId, id: TaskId)
    -> TaskRepositoryResult<Option<Task>>;

    /// Returns the owner's tasks within `scope`, in no particular order.
    async fn list(&self, owner_id: OwnerId, scope: TaskScope) -> TaskRepositoryResult<Vec<Task>>;

    /// Deletes a task and its direct subtasks as one atomic step.
    ///
    /// Ownership is checked on the task itself. Every row whose parent is the
    /// task goes with it. Returns the number of removed records.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist
    /// for the owner; nothing is removed in that case.
    async fn delete_with_subtasks(
        &self,
        owner_id: OwnerId,
        id: TaskId,
    ) -> TaskRepositoryResult<usize>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found for the owner.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
