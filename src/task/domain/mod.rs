//! Domain model for task management.
//!
//! The task domain holds the validated task aggregate, the completion-time
//! rule applied to status changes, display ordering, and list filtering. All
//! infrastructure concerns stay outside this boundary.

mod error;
mod fields;
mod filter;
mod ids;
mod lifecycle;
mod ordering;
mod status;
mod task;

pub use error::{ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError};
pub use fields::{
    MAX_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH, MIN_TITLE_LENGTH, TaskDescription, TaskTitle,
    parse_due_date,
};
pub use filter::TaskFilter;
pub use ids::{OwnerId, TaskId};
pub use lifecycle::{StatusChange, resolve_status_change};
pub use ordering::{compare_tasks, sort_tasks, sort_tasks_in_place};
pub use status::{TaskPriority, TaskStatus};
pub use task::{PersistedTaskData, Task, TaskDraft, TaskEdit};
