//! Task domain model.
//!
//! # Responsibility
//! - Define the persisted `Task` record and its JSON shape.
//! - Validate and normalize user input through `TaskDraft`.
//!
//! # Invariants
//! - `id` is assigned once at creation and never rewritten.
//! - `title` is non-empty after trimming.
//! - `due_date` has day granularity; an empty string in storage means "none".

use crate::model::validation::{in_scale, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stable task identifier.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = String;

/// Task urgency on a 1..5 scale, 5 being the most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Priority(u8);

impl Priority {
    /// Priority used by quick add when the user gives only a title.
    pub const QUICK_ADD: Priority = Priority(3);

    /// Validates a raw priority value.
    ///
    /// # Errors
    /// - `ValidationError::PriorityOutOfRange` when `value` is outside `1..=5`.
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        in_scale(value)
            .map(Self)
            .ok_or(ValidationError::PriorityOutOfRange(value))
    }

    /// Builds a priority by clamping `value` into `1..=5`.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(1, 5) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::QUICK_ADD
    }
}

impl TryFrom<i64> for Priority {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Priority> for u8 {
    fn from(value: Priority) -> Self {
        value.0
    }
}

/// Persisted to-do item.
///
/// Field names follow the stored JSON blob (`dueDate` in camelCase).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub notes: String,
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "optional_day"
    )]
    pub due_date: Option<NaiveDate>,
}

impl Task {
    /// Creates an incomplete task from an already validated draft.
    pub fn from_draft(id: TaskId, draft: TaskDraft) -> Self {
        Self {
            id,
            title: draft.title,
            notes: draft.notes,
            priority: draft.priority,
            completed: false,
            due_date: draft.due_date,
        }
    }

    /// Overwrites every mutable field from `draft`, leaving `id` and
    /// `completed` untouched.
    pub fn apply(&mut self, draft: TaskDraft) {
        self.title = draft.title;
        self.notes = draft.notes;
        self.priority = draft.priority;
        self.due_date = draft.due_date;
    }
}

/// User-editable task fields, used for both create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub notes: String,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
}

impl TaskDraft {
    /// Starts a draft with empty notes, quick-add priority and no due date.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            notes: String::new(),
            priority: Priority::QUICK_ADD,
            due_date: None,
        }
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = due_date;
        self
    }

    /// Trims text fields and rejects an empty title.
    ///
    /// # Errors
    /// - `ValidationError::EmptyTitle` when the trimmed title is empty.
    pub fn normalized(self) -> Result<Self, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(Self {
            title: title.to_string(),
            notes: self.notes.trim().to_string(),
            ..self
        })
    }
}

/// Serde adapter for `Option<NaiveDate>` stored as `YYYY-MM-DD`.
///
/// Empty strings and `null` both decode to `None`.
mod optional_day {
    use chrono::NaiveDate;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    const DAY_FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(day) => serializer.serialize_str(&day.format(DAY_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => NaiveDate::parse_from_str(text, DAY_FORMAT)
                .map(Some)
                .map_err(|err| D::Error::custom(format!("invalid dueDate `{text}`: {err}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Priority, Task, TaskDraft};
    use crate::model::validation::ValidationError;
    use chrono::NaiveDate;

    #[test]
    fn priority_rejects_values_outside_scale() {
        assert_eq!(Priority::new(0), Err(ValidationError::PriorityOutOfRange(0)));
        assert_eq!(Priority::new(6), Err(ValidationError::PriorityOutOfRange(6)));
        assert_eq!(Priority::new(5).unwrap().value(), 5);
    }

    #[test]
    fn priority_clamps_into_scale() {
        assert_eq!(Priority::clamped(-3).value(), 1);
        assert_eq!(Priority::clamped(9).value(), 5);
    }

    #[test]
    fn draft_normalization_trims_and_rejects_blank_title() {
        let err = TaskDraft::new("   ").normalized().unwrap_err();
        assert_eq!(err, ValidationError::EmptyTitle);

        let draft = TaskDraft::new("  walk  ").notes(" outside ").normalized().unwrap();
        assert_eq!(draft.title, "walk");
        assert_eq!(draft.notes, "outside");
    }

    #[test]
    fn empty_due_date_string_decodes_as_none() {
        let json = r#"{"id":"1","title":"t","notes":"","priority":2,"completed":false,"dueDate":""}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.due_date, None);
    }

    #[test]
    fn task_json_uses_camel_case_and_omits_missing_date() {
        let mut task = Task::from_draft("7".to_string(), TaskDraft::new("read"));
        let json = serde_json::to_string(&task).unwrap();
        assert!(!json.contains("dueDate"));

        task.due_date = NaiveDate::from_ymd_opt(2024, 1, 5);
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains(r#""dueDate":"2024-01-05""#));
    }

    #[test]
    fn out_of_range_priority_fails_to_decode() {
        let json = r#"{"id":"1","title":"t","notes":"","priority":9,"completed":false}"#;
        assert!(serde_json::from_str::<Task>(json).is_err());
    }
}
