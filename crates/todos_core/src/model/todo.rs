//! Todo domain model.
//!
//! # Responsibility
//! - Define the canonical to-do record and its JSON wire shape.
//! - Provide display projections used by the list view.
//!
//! # Invariants
//! - `id` is non-blank and never reassigned once created.
//! - Decoding a record runs the same validation as `Todo::validate()`.

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a to-do record.
///
/// Kept as a plain string because ids are assigned by the creator and also
/// double as notification request identifiers.
pub type TodoId = String;

const DUE_LABEL_FORMAT: &str = "%b %-d, %Y at %-I:%M %p";

/// Validation errors for to-do records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoValidationError {
    /// `id` is empty or whitespace-only.
    BlankId,
}

impl Display for TodoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankId => write!(f, "todo id must not be blank"),
        }
    }
}

impl Error for TodoValidationError {}

/// Canonical to-do record.
///
/// Field order mirrors the persisted JSON objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TodoWire")]
pub struct Todo {
    pub title: String,
    /// Due time; also the reminder fire time.
    pub due: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    /// Serialized as `shouldNotify` to match the on-disk schema.
    #[serde(rename = "shouldNotify")]
    pub should_notify: bool,
    pub id: TodoId,
}

#[derive(Deserialize)]
struct TodoWire {
    title: String,
    due: DateTime<Utc>,
    #[serde(default)]
    memo: Option<String>,
    #[serde(rename = "shouldNotify")]
    should_notify: bool,
    id: TodoId,
}

impl TryFrom<TodoWire> for Todo {
    type Error = TodoValidationError;

    fn try_from(value: TodoWire) -> Result<Self, Self::Error> {
        let todo = Self {
            title: value.title,
            due: value.due,
            memo: value.memo,
            should_notify: value.should_notify,
            id: value.id,
        };
        todo.validate()?;
        Ok(todo)
    }
}

impl Todo {
    /// Creates a record with a generated UUID v4 id.
    ///
    /// Reminders are off by default; callers opt in via `should_notify`.
    pub fn new(title: impl Into<String>, due: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            due,
            memo: None,
            should_notify: false,
            id: Uuid::new_v4().to_string(),
        }
    }

    /// Creates a record with a caller-provided id.
    ///
    /// # Errors
    /// - `TodoValidationError::BlankId` when `id` is blank.
    pub fn with_id(
        id: impl Into<TodoId>,
        title: impl Into<String>,
        due: DateTime<Utc>,
    ) -> Result<Self, TodoValidationError> {
        let todo = Self {
            title: title.into(),
            due,
            memo: None,
            should_notify: false,
            id: id.into(),
        };
        todo.validate()?;
        Ok(todo)
    }

    /// Checks record invariants.
    pub fn validate(&self) -> Result<(), TodoValidationError> {
        if self.id.trim().is_empty() {
            return Err(TodoValidationError::BlankId);
        }
        Ok(())
    }

    /// Builds the list-row projection using the local timezone.
    pub fn row(&self) -> TodoRow {
        TodoRow {
            id: self.id.clone(),
            title: self.title.clone(),
            due_label: format_due(&self.due),
        }
    }
}

/// Row shown by the list view: title plus a formatted due date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoRow {
    pub id: TodoId,
    pub title: String,
    pub due_label: String,
}

/// Formats a due time in local time as medium date + short time.
pub fn format_due(due: &DateTime<Utc>) -> String {
    format_due_in(due, &Local)
}

/// Formats a due time in the given timezone, e.g. `Nov 9, 2022 at 3:05 PM`.
pub fn format_due_in<Tz>(due: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    due.with_timezone(tz).format(DUE_LABEL_FORMAT).to_string()
}
