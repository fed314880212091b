//! Completion-time rule applied to every status change.

use super::TaskStatus;
use chrono::{DateTime, Utc};

/// Status and completion time to persist after a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    /// Status after the change.
    pub status: TaskStatus,
    /// Completion time after the change; `Some` exactly when `status` is done.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Resolves the status and completion time for a requested status.
///
/// Entering `DONE` always stamps `now`, even when the task was already done.
/// Leaving `DONE` clears the completion time. Moves between the other
/// statuses keep the prior completion time, which is `None` for any task that
/// satisfies the completion invariant.
///
/// # Examples
///
///     use chrono::Utc;
///     use taskboard::task::domain::{TaskStatus, resolve_status_change};
///
///     let now = Utc::now();
///     let change = resolve_status_change(TaskStatus::Done, Some(now), TaskStatus::Pending, now);
///     assert_eq!(change.status, TaskStatus::Pending);
///     assert_eq!(change.completed_at, None);
#[must_use]
pub fn resolve_status_change(
    prior_status: TaskStatus,
    prior_completed_at: Option<DateTime<Utc>>,
    requested: TaskStatus,
    now: DateTime<Utc>,
) -> StatusChange {
    let completed_at = match (requested, prior_status) {
        (TaskStatus::Done, _) => Some(now),
        (_, TaskStatus::Done) => None,
        _ => prior_completed_at,
    };

    StatusChange {
        status: requested,
        completed_at,
    }
}
