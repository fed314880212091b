//! Application services for task management.

mod lifecycle;

pub use lifecycle::{
    ChangeStatusRequest, CreateSubtaskRequest, CreateTaskRequest, TaskDetail, TaskErrorKind,
    TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService, TaskListQuery,
    UpdateTaskRequest,
};
