//! Display ordering for task lists.
//!
//! Tasks are ordered by four keys, each consulted only when the previous ones
//! tie:
//!
//! 1. status rank, descending (`IN_PROGRESS`, then `PENDING`, then `DONE`);
//! 2. due date, ascending, with undated tasks after every dated one;
//! 3. priority rank, descending (`HIGH`, then `MEDIUM`, then `LOW`);
//! 4. creation time, ascending.
//!
//! The task identifier breaks any remaining tie so the result does not depend
//! on the input order.

use super::Task;
use chrono::NaiveDate;
use std::cmp::Ordering;

/// Compares two tasks by display order.
#[must_use]
pub fn compare_tasks(a: &Task, b: &Task) -> Ordering {
    b.status()
        .rank()
        .cmp(&a.status().rank())
        .then_with(|| compare_due_dates(a.due_date(), b.due_date()))
        .then_with(|| b.priority().rank().cmp(&a.priority().rank()))
        .then_with(|| a.created_at().cmp(&b.created_at()))
        .then_with(|| a.id().cmp(&b.id()))
}

/// Returns a sorted copy of `tasks`, leaving the input untouched.
///
/// # Examples
///
///     use taskboard::task::domain::sort_tasks;
///
///     assert!(sort_tasks(&[]).is_empty());
#[must_use]
pub fn sort_tasks(tasks: &[Task]) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sort_tasks_in_place(&mut sorted);
    sorted
}

/// Sorts an owned task list by display order.
pub fn sort_tasks_in_place(tasks: &mut [Task]) {
    tasks.sort_by(compare_tasks);
}

/// Undated tasks sort after dated ones.
fn compare_due_dates(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
