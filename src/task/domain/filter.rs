//! List filtering by text search, status, and priority.

use super::{Task, TaskPriority, TaskStatus};

/// Criteria a task must meet to appear in a filtered list.
///
/// An empty filter matches every task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    search: Option<String>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
}

impl TaskFilter {
    /// Creates a filter that matches every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to tasks whose title or description contains `query`,
    /// ignoring case. A blank query is ignored.
    #[must_use]
    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        let raw = query.into();
        let normalized = raw.trim();
        self.search = (!normalized.is_empty()).then(|| normalized.to_lowercase());
        self
    }

    /// Restricts to tasks with the given status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts to tasks with the given priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Returns `true` when no criterion is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.search.is_none() && self.status.is_none() && self.priority.is_none()
    }

    /// Returns `true` when `task` meets every criterion.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        let status_matches = self.status.is_none_or(|status| task.status() == status);
        let priority_matches = self
            .priority
            .is_none_or(|priority| task.priority() == priority);

        status_matches && priority_matches && self.matches_search(task)
    }

    fn matches_search(&self, task: &Task) -> bool {
        let Some(query) = self.search.as_deref() else {
            return true;
        };

        task.title().as_str().to_lowercase().contains(query)
            || task
                .description()
                .map(|description| description.as_str().to_lowercase())
                .is_some_and(|text| text.contains(query))
    }
}
