//! Service layer for owner-scoped task creation, editing, status changes,
//! listing, and deletion.

use crate::task::{
    domain::{
        OwnerId, ParseTaskPriorityError, ParseTaskStatusError, Task, TaskDescription,
        TaskDomainError, TaskDraft, TaskEdit, TaskFilter, TaskId, TaskPriority, TaskStatus,
        TaskTitle, parse_due_date, sort_tasks_in_place,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskScope},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for creating a top-level task from raw input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    priority: Option<String>,
    due_date: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority: None,
            due_date: None,
        }
    }

    /// Sets the description; blank text means none.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority (`LOW`, `MEDIUM`, `HIGH`); `MEDIUM` when unset.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Sets the due date as `YYYY-MM-DD`; blank text means none.
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    fn into_draft(self) -> TaskLifecycleResult<TaskDraft> {
        let title = TaskTitle::new(self.title)?;
        let description = self
            .description
            .as_deref()
            .map(TaskDescription::parse)
            .transpose()?
            .flatten();
        let priority = self
            .priority
            .as_deref()
            .map(TaskPriority::try_from)
            .transpose()?
            .unwrap_or_default();
        let due_date = self
            .due_date
            .as_deref()
            .map(parse_due_date)
            .transpose()?
            .flatten();

        Ok(TaskDraft::new(title)
            .with_description(description)
            .with_priority(priority)
            .with_due_date(due_date))
    }
}

/// Request payload for creating a subtask under an existing task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSubtaskRequest {
    parent_id: TaskId,
    fields: CreateTaskRequest,
}

impl CreateSubtaskRequest {
    /// Creates a request for a subtask of `parent_id`.
    #[must_use]
    pub fn new(parent_id: TaskId, title: impl Into<String>) -> Self {
        Self {
            parent_id,
            fields: CreateTaskRequest::new(title),
        }
    }

    /// Sets the description; blank text means none.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.fields = self.fields.with_description(description);
        self
    }

    /// Sets the priority; `MEDIUM` when unset.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.fields = self.fields.with_priority(priority);
        self
    }

    /// Sets the due date as `YYYY-MM-DD`.
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.fields = self.fields.with_due_date(due_date);
        self
    }
}

/// Request payload for editing a task.
///
/// Unset fields are left unchanged. A blank description or due date clears
/// the stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    task_id: TaskId,
    title: Option<String>,
    description: Option<String>,
    priority: Option<String>,
    due_date: Option<String>,
    status: Option<String>,
}

impl UpdateTaskRequest {
    /// Creates an edit request for `task_id` that changes nothing yet.
    #[must_use]
    pub const fn new(task_id: TaskId) -> Self {
        Self {
            task_id,
            title: None,
            description: None,
            priority: None,
            due_date: None,
            status: None,
        }
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description; blank text clears it.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Replaces the due date; blank text clears it.
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    /// Requests a status change alongside the field edits.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    fn into_parts(self) -> TaskLifecycleResult<(TaskId, TaskEdit, Option<TaskStatus>)> {
        let mut edit = TaskEdit::new();
        if let Some(title) = self.title {
            edit = edit.with_title(TaskTitle::new(title)?);
        }
        if let Some(description) = self.description.as_deref() {
            edit = edit.with_description(TaskDescription::parse(description)?);
        }
        if let Some(priority) = self.priority.as_deref() {
            edit = edit.with_priority(TaskPriority::try_from(priority)?);
        }
        if let Some(due_date) = self.due_date.as_deref() {
            edit = edit.with_due_date(parse_due_date(due_date)?);
        }
        let status = self
            .status
            .as_deref()
            .map(TaskStatus::try_from)
            .transpose()?;

        Ok((self.task_id, edit, status))
    }
}

/// Request payload for assigning a status directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeStatusRequest {
    task_id: TaskId,
    status: String,
}

impl ChangeStatusRequest {
    /// Creates a request moving `task_id` to `status`.
    #[must_use]
    pub fn new(task_id: TaskId, status: impl Into<String>) -> Self {
        Self {
            task_id,
            status: status.into(),
        }
    }
}

/// Listing parameters: which tasks to consider and how to filter them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListQuery {
    scope: TaskScope,
    filter: TaskFilter,
}

impl TaskListQuery {
    /// Lists every task of the owner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lists only top-level tasks.
    #[must_use]
    pub fn top_level() -> Self {
        Self {
            scope: TaskScope::TopLevel,
            filter: TaskFilter::default(),
        }
    }

    /// Lists only the subtasks of `parent_id`.
    #[must_use]
    pub fn subtasks_of(parent_id: TaskId) -> Self {
        Self {
            scope: TaskScope::ChildrenOf(parent_id),
            filter: TaskFilter::default(),
        }
    }

    /// Applies `filter` before ordering.
    #[must_use]
    pub fn with_filter(mut self, filter: TaskFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Returns the listing scope.
    #[must_use]
    pub const fn scope(&self) -> TaskScope {
        self.scope
    }

    /// Returns the filter.
    #[must_use]
    pub const fn filter(&self) -> &TaskFilter {
        &self.filter
    }
}

/// A task together with its ordered subtasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetail {
    task: Task,
    subtasks: Vec<Task>,
}

impl TaskDetail {
    /// Returns the task.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Returns the subtasks in display order.
    #[must_use]
    pub fn subtasks(&self) -> &[Task] {
        &self.subtasks
    }
}

/// Coarse error category for translating failures into responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskErrorKind {
    /// Input failed validation; nothing was written.
    Validation,
    /// The task is missing or belongs to someone else.
    NotFound,
    /// The request contradicts existing data.
    Conflict,
    /// Persistence failed.
    Internal,
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The status is outside the enumeration.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),
    /// The priority is outside the enumeration.
    #[error(transparent)]
    InvalidPriority(#[from] ParseTaskPriorityError),
    /// The task does not exist for this owner.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// The parent task does not exist for this owner.
    #[error("parent task not found: {0}")]
    ParentNotFound(TaskId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(TaskRepositoryError),
}

impl TaskLifecycleError {
    /// Returns the error category.
    #[must_use]
    pub const fn kind(&self) -> TaskErrorKind {
        match self {
            Self::Domain(TaskDomainError::NestedSubtask { .. })
            | Self::Repository(TaskRepositoryError::DuplicateTask(_)) => TaskErrorKind::Conflict,
            Self::Domain(_) | Self::InvalidStatus(_) | Self::InvalidPriority(_) => {
                TaskErrorKind::Validation
            }
            Self::NotFound(_)
            | Self::ParentNotFound(_)
            | Self::Repository(TaskRepositoryError::NotFound(_)) => TaskErrorKind::NotFound,
            Self::Repository(TaskRepositoryError::Persistence(_)) => TaskErrorKind::Internal,
        }
    }
}

impl From<TaskRepositoryError> for TaskLifecycleError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(task_id) => Self::NotFound(task_id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for task service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Owner-scoped task orchestration service.
///
/// Every operation validates its input before touching the repository, so a
/// rejected request never leaves a partial write behind.
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for TaskLifecycleService<R, C>
where
    R: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a top-level task in the `PENDING` status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when input validation fails or the
    /// repository rejects persistence.
    pub async fn create_task(
        &self,
        owner_id: OwnerId,
        request: CreateTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let draft = request.into_draft()?;
        let task = Task::new(owner_id, draft, &*self.clock);
        self.repository.store(&task).await?;
        info!(task_id = %task.id(), %owner_id, "task created");
        Ok(task)
    }

    /// Creates a subtask under a top-level task owned by `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::ParentNotFound`] when the parent is
    /// missing or foreign, and [`TaskDomainError::NestedSubtask`] (wrapped)
    /// when the parent is itself a subtask.
    pub async fn create_subtask(
        &self,
        owner_id: OwnerId,
        request: CreateSubtaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let CreateSubtaskRequest { parent_id, fields } = request;
        let draft = fields.into_draft()?;
        let parent = self
            .repository
            .find_by_id(owner_id, parent_id)
            .await?
            .ok_or_else(|| {
                warn!(%parent_id, %owner_id, "parent task not found for owner");
                TaskLifecycleError::ParentNotFound(parent_id)
            })?;

        let subtask = Task::new_subtask(&parent, draft, &*self.clock)?;
        self.repository.store(&subtask).await?;
        info!(task_id = %subtask.id(), %parent_id, %owner_id, "subtask created");
        Ok(subtask)
    }

    /// Retrieves one task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task is missing or
    /// foreign.
    pub async fn find_task(&self, owner_id: OwnerId, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.load_owned(owner_id, task_id).await
    }

    /// Retrieves a task and its subtasks in display order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task is missing or
    /// foreign.
    pub async fn find_task_with_subtasks(
        &self,
        owner_id: OwnerId,
        task_id: TaskId,
    ) -> TaskLifecycleResult<TaskDetail> {
        let task = self.load_owned(owner_id, task_id).await?;
        let mut subtasks = self
            .repository
            .list(owner_id, TaskScope::ChildrenOf(task_id))
            .await?;
        sort_tasks_in_place(&mut subtasks);
        Ok(TaskDetail { task, subtasks })
    }

    /// Lists the owner's tasks, filtered and in display order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::ParentNotFound`] when listing the
    /// subtasks of a missing or foreign parent.
    pub async fn list_tasks(
        &self,
        owner_id: OwnerId,
        query: &TaskListQuery,
    ) -> TaskLifecycleResult<Vec<Task>> {
        if let TaskScope::ChildrenOf(parent_id) = query.scope() {
            let parent = self.repository.find_by_id(owner_id, parent_id).await?;
            if parent.is_none() {
                warn!(%parent_id, %owner_id, "parent task not found for owner");
                return Err(TaskLifecycleError::ParentNotFound(parent_id));
            }
        }

        let mut tasks: Vec<Task> = self
            .repository
            .list(owner_id, query.scope())
            .await?
            .into_iter()
            .filter(|task| query.filter().matches(task))
            .collect();
        sort_tasks_in_place(&mut tasks);
        debug!(%owner_id, count = tasks.len(), "listed tasks");
        Ok(tasks)
    }

    /// Applies field edits and an optional status change.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when any field is invalid (nothing is
    /// written) or the task is missing or foreign.
    pub async fn update_task(
        &self,
        owner_id: OwnerId,
        request: UpdateTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let (task_id, edit, status) = request.into_parts()?;
        let mut task = self.load_owned(owner_id, task_id).await?;

        task.apply_edit(edit, &*self.clock);
        if let Some(requested) = status {
            task.change_status(requested, &*self.clock);
        }
        self.repository.update(&task).await?;
        info!(%task_id, %owner_id, status = %task.status(), "task updated");
        Ok(task)
    }

    /// Assigns a status, stamping or clearing the completion time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::InvalidStatus`] for a status outside the
    /// enumeration and [`TaskLifecycleError::NotFound`] when the task is
    /// missing or foreign. Neither case writes anything.
    pub async fn change_status(
        &self,
        owner_id: OwnerId,
        request: ChangeStatusRequest,
    ) -> TaskLifecycleResult<Task> {
        let requested = TaskStatus::try_from(request.status.as_str())?;
        let mut task = self.load_owned(owner_id, request.task_id).await?;
        let from = task.status();
        let change = task.change_status(requested, &*self.clock);
        self.repository.update(&task).await?;
        info!(task_id = %task.id(), %owner_id, %from, to = %change.status, "task status changed");
        Ok(task)
    }

    /// Advances along `PENDING → IN_PROGRESS → DONE`; done tasks stay done.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task is missing or
    /// foreign.
    pub async fn advance_status(
        &self,
        owner_id: OwnerId,
        task_id: TaskId,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.load_owned(owner_id, task_id).await?;
        let from = task.status();
        let change = task.advance_status(&*self.clock);
        self.repository.update(&task).await?;
        info!(%task_id, %owner_id, %from, to = %change.status, "task status advanced");
        Ok(task)
    }

    /// Deletes a task together with its direct subtasks.
    ///
    /// Returns the number of removed records.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task is missing or
    /// foreign; nothing is removed in that case.
    pub async fn delete_task(
        &self,
        owner_id: OwnerId,
        task_id: TaskId,
    ) -> TaskLifecycleResult<usize> {
        let removed = self
            .repository
            .delete_with_subtasks(owner_id, task_id)
            .await?;
        info!(%task_id, %owner_id, removed, "task deleted");
        Ok(removed)
    }

    async fn load_owned(&self, owner_id: OwnerId, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(owner_id, task_id)
            .await?
            .ok_or_else(|| {
                warn!(%task_id, %owner_id, "task not found for owner");
                TaskLifecycleError::NotFound(task_id)
            })
    }
}
