use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use sqlx::FromRow;

use crate::date::CalendarDate;

/// Upper bound on rows returned by a task listing.
pub const DEFAULT_TASKS_LIMIT: i64 = 50;

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Task {
    #[serde_as(as = "DisplayFromStr")]
    pub id: i64,
    /// Due date in `YYYYMMDD` form.
    pub date: String,
    pub title: String,
    pub comment: String,
    /// Raw recurrence rule; empty for one-off tasks.
    pub repeat: String,
}

impl Task {
    pub fn is_recurring(&self) -> bool {
        !self.repeat.is_empty()
    }
}

/// Task body as sent by clients. Every field may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskPayload {
    pub id: String,
    pub date: String,
    pub title: String,
    pub comment: String,
    pub repeat: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTaskData {
    pub date: String,
    pub title: String,
    pub comment: String,
    pub repeat: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskData {
    pub date: String,
    pub title: String,
    pub comment: String,
    pub repeat: String,
}

impl From<NewTaskData> for UpdateTaskData {
    fn from(data: NewTaskData) -> Self {
        Self {
            date: data.date,
            title: data.title,
            comment: data.comment,
            repeat: data.repeat,
        }
    }
}

/// What marking a task done did to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionResult {
    /// A one-off task; it has been deleted.
    Removed(Task),
    /// A recurring task moved to its next occurrence.
    Rescheduled { task: Task, previous_date: String },
}

/// How a free-text search string filters the task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskSearch {
    All,
    /// The search string was a `DD.MM.YYYY` date.
    OnDate(CalendarDate),
    /// Substring of the title or comment.
    Text(String),
}

impl TaskSearch {
    pub fn parse(search: &str) -> Self {
        let search = search.trim();
        if search.is_empty() {
            TaskSearch::All
        } else if let Some(date) = CalendarDate::parse_search(search) {
            TaskSearch::OnDate(date)
        } else {
            TaskSearch::Text(search.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_id_serializes_as_string() {
        let task = Task {
            id: 42,
            date: "20240101".to_string(),
            title: "Pay rent".to_string(),
            comment: String::new(),
            repeat: "m 1".to_string(),
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["id"], "42");
        assert_eq!(json["repeat"], "m 1");

        let back: Task = serde_json::from_value(json).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn test_payload_fields_default_to_empty() {
        let payload: TaskPayload = serde_json::from_str(r#"{"title": "Call mom"}"#).unwrap();
        assert_eq!(payload.title, "Call mom");
        assert!(payload.id.is_empty());
        assert!(payload.date.is_empty());
        assert!(payload.repeat.is_empty());
    }

    #[test]
    fn test_search_classification() {
        assert_eq!(TaskSearch::parse("  "), TaskSearch::All);
        assert_eq!(
            TaskSearch::parse("08.02.2024"),
            TaskSearch::OnDate(CalendarDate::parse("20240208").unwrap())
        );
        assert_eq!(TaskSearch::parse("gym"), TaskSearch::Text("gym".to_string()));
        assert_eq!(TaskSearch::parse(" gym \t"), TaskSearch::Text("gym".to_string()));
        assert_eq!(
            TaskSearch::parse(" 08.02.2024 "),
            TaskSearch::OnDate(CalendarDate::parse("20240208").unwrap())
        );
        assert_eq!(TaskSearch::parse("32.01.2024"), TaskSearch::Text("32.01.2024".to_string()));
    }
}
