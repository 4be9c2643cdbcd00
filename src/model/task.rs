use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::due_date;
use crate::model::ids::TaskId;

/// Uncommitted edit values held while a task is being edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub text: String,
    pub due_date: Option<NaiveDate>,
}

/// Edit sub-state of a task
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Viewing,
    Editing(Draft),
}

/// Partial change to a draft. `None` leaves the field alone; for the due
/// date, `Some(None)` clears it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DraftUpdate {
    pub text: Option<String>,
    pub due_date: Option<Option<NaiveDate>>,
}

impl DraftUpdate {
    pub fn text(text: impl Into<String>) -> Self {
        DraftUpdate {
            text: Some(text.into()),
            due_date: None,
        }
    }

    pub fn due_date(due_date: Option<NaiveDate>) -> Self {
        DraftUpdate {
            text: None,
            due_date: Some(due_date),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.due_date.is_none()
    }
}

/// A single task inside a list.
///
/// Only the committed fields are persisted; `edit_state` always comes back
/// as `Viewing` after a reload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, with = "due_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip)]
    pub edit_state: EditState,
}

impl Task {
    /// Create a pending task that is not being edited
    pub fn new(id: TaskId, text: String, due_date: Option<NaiveDate>) -> Self {
        Task {
            id,
            text,
            completed: false,
            due_date,
            edit_state: EditState::Viewing,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.edit_state, EditState::Editing(_))
    }

    /// Equal in every persisted field; edit state is ignored
    pub fn stored_eq(&self, other: &Task) -> bool {
        self.id == other.id
            && self.text == other.text
            && self.completed == other.completed
            && self.due_date == other.due_date
    }

    pub fn draft(&self) -> Option<&Draft> {
        match &self.edit_state {
            EditState::Editing(draft) => Some(draft),
            EditState::Viewing => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_committed_fields_only() {
        let mut task = Task::new(
            TaskId(7),
            "Milk".into(),
            NaiveDate::from_ymd_opt(2024, 1, 5),
        );
        task.edit_state = EditState::Editing(Draft {
            text: "Oat milk".into(),
            due_date: None,
        });
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 7,
                "text": "Milk",
                "completed": false,
                "dueDate": "2024-01-05"
            })
        );
    }

    #[test]
    fn missing_due_date_is_null() {
        let task = Task::new(TaskId(1), "Eggs".into(), None);
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"dueDate\":null"));
    }

    #[test]
    fn legacy_fields_are_ignored_and_edit_state_resets() {
        let task: Task = serde_json::from_str(
            r#"{"id":3,"text":"Bread","completed":true,"isEditing":true,"dueDate":"2024-02-01T00:00:00.000Z"}"#,
        )
        .unwrap();
        assert_eq!(task.id, TaskId(3));
        assert!(task.completed);
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2024, 2, 1));
        assert_eq!(task.edit_state, EditState::Viewing);
    }

    #[test]
    fn completed_and_due_date_default() {
        let task: Task = serde_json::from_str(r#"{"id":4,"text":"Jam"}"#).unwrap();
        assert!(!task.completed);
        assert!(task.due_date.is_none());
    }

    #[test]
    fn bad_due_date_reads_as_unset() {
        let task: Task =
            serde_json::from_str(r#"{"id":4,"text":"Jam","dueDate":"soon"}"#).unwrap();
        assert_eq!(task.text, "Jam");
        assert!(task.due_date.is_none());
    }

    #[test]
    fn draft_accessor() {
        let mut task = Task::new(TaskId(1), "Eggs".into(), None);
        assert!(task.draft().is_none());
        task.edit_state = EditState::Editing(Draft {
            text: "Eggs x12".into(),
            due_date: None,
        });
        assert!(task.is_editing());
        assert_eq!(task.draft().unwrap().text, "Eggs x12");
    }
}
