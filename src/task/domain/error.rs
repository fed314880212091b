//! Error types for task domain validation and parsing.

use super::TaskId;
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The trimmed title length is outside the accepted range.
    #[error("task title must be between {min} and {max} characters, got {length}")]
    InvalidTitleLength {
        /// Character count after trimming.
        length: usize,
        /// Minimum accepted length.
        min: usize,
        /// Maximum accepted length.
        max: usize,
    },

    /// The trimmed description exceeds the accepted length.
    #[error("task description must be at most {max} characters, got {length}")]
    DescriptionTooLong {
        /// Character count after trimming.
        length: usize,
        /// Maximum accepted length.
        max: usize,
    },

    /// The due date is not a calendar date.
    #[error("invalid due date '{0}', expected YYYY-MM-DD")]
    InvalidDueDate(String),

    /// The requested parent is itself a subtask.
    #[error("task {parent} is a subtask and cannot have subtasks of its own")]
    NestedSubtask {
        /// Identifier of the rejected parent.
        parent: TaskId,
    },
}

/// Error returned while parsing task statuses from input or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from input or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);
