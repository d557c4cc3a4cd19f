//! Validation and date normalization applied before a task is stored.

use crate::date::CalendarDate;
use crate::error::{CoreError, RecurrenceError};
use crate::models::{NewTaskData, TaskPayload, UpdateTaskData};
use crate::recurrence::next_date;

/// Resolves the date a task should be stored with.
///
/// An empty date means today. A non-empty rule is validated even when the date
/// is current. A date already in the past moves to today for one-off tasks and
/// to the rule's next occurrence for recurring ones.
pub fn check_date(today: CalendarDate, date: &str, repeat: &str) -> Result<String, RecurrenceError> {
    let date = if date.is_empty() {
        today
    } else {
        CalendarDate::parse(date)?
    };

    let next = if repeat.is_empty() {
        None
    } else {
        Some(next_date(today, &date.to_string(), repeat)?)
    };

    if today.is_after(&date) {
        return Ok(next.unwrap_or_else(|| today.to_string()));
    }
    Ok(date.to_string())
}

pub fn parse_task_id(id: &str) -> Result<i64, CoreError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(CoreError::InvalidInput("task id is required".to_string()));
    }
    id.parse()
        .map_err(|_| CoreError::InvalidInput(format!("invalid task id '{}'", id)))
}

/// Checks a client payload and turns it into insertable data.
pub fn prepare_new_task(today: CalendarDate, payload: TaskPayload) -> Result<NewTaskData, CoreError> {
    if payload.title.trim().is_empty() {
        return Err(CoreError::InvalidInput("task title is required".to_string()));
    }
    let date = check_date(today, &payload.date, &payload.repeat)?;
    Ok(NewTaskData {
        date,
        title: payload.title,
        comment: payload.comment,
        repeat: payload.repeat,
    })
}

/// Like [`prepare_new_task`], but the payload must also carry the task id.
pub fn prepare_update(today: CalendarDate, payload: TaskPayload) -> Result<(i64, UpdateTaskData), CoreError> {
    let id = parse_task_id(&payload.id)?;
    let data = prepare_new_task(today, payload)?;
    Ok((id, data.into()))
}
