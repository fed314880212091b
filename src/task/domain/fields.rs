//! Validated scalar fields carried by a task.

use super::TaskDomainError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum title length in characters, after trimming.
pub const MIN_TITLE_LENGTH: usize = 3;

/// Maximum title length in characters, after trimming.
pub const MAX_TITLE_LENGTH: usize = 80;

/// Maximum description length in characters, after trimming.
pub const MAX_DESCRIPTION_LENGTH: usize = 280;

/// Date format accepted for due dates.
const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Validated task title.
///
/// # Examples
///
///     use taskboard::task::domain::TaskTitle;
///
///     let title = TaskTitle::new("  Pay rent ").expect("valid");
///     assert_eq!(title.as_str(), "Pay rent");
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a trimmed, length-checked title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTitleLength`] when the trimmed value
    /// is shorter than [`MIN_TITLE_LENGTH`] or longer than
    /// [`MAX_TITLE_LENGTH`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        let length = normalized.chars().count();

        if !(MIN_TITLE_LENGTH..=MAX_TITLE_LENGTH).contains(&length) {
            return Err(TaskDomainError::InvalidTitleLength {
                length,
                min: MIN_TITLE_LENGTH,
                max: MAX_TITLE_LENGTH,
            });
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the title as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated, non-blank task description.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskDescription(String);

impl TaskDescription {
    /// Parses an optional description.
    ///
    /// Blank input yields `Ok(None)`: an empty description is stored as no
    /// description.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DescriptionTooLong`] when the trimmed value
    /// exceeds [`MAX_DESCRIPTION_LENGTH`] characters.
    pub fn parse(value: &str) -> Result<Option<Self>, TaskDomainError> {
        let normalized = value.trim();
        if normalized.is_empty() {
            return Ok(None);
        }

        let length = normalized.chars().count();
        if length > MAX_DESCRIPTION_LENGTH {
            return Err(TaskDomainError::DescriptionTooLong {
                length,
                max: MAX_DESCRIPTION_LENGTH,
            });
        }

        Ok(Some(Self(normalized.to_owned())))
    }

    /// Returns the description as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskDescription {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parses an optional `YYYY-MM-DD` due date; blank input means no due date.
///
/// # Errors
///
/// Returns [`TaskDomainError::InvalidDueDate`] when the value is not a valid
/// calendar date.
pub fn parse_due_date(value: &str) -> Result<Option<NaiveDate>, TaskDomainError> {
    let normalized = value.trim();
    if normalized.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(normalized, DUE_DATE_FORMAT)
        .map(Some)
        .map_err(|_| TaskDomainError::InvalidDueDate(value.to_owned()))
}
