use anyhow::{anyhow, Result};
use chrono::Local;
use sked_core::date::CalendarDate;
use sked_core::error::CoreError;
use sked_core::models::Task;
use sked_core::repository::Repository;
use sked_core::scheduling::parse_task_id;

/// The current local calendar date.
pub fn today() -> CalendarDate {
    CalendarDate::from(Local::now().date_naive())
}

pub async fn resolve_task(repo: &impl Repository, id: &str) -> Result<Task> {
    let task_id = parse_task_id(id)?;
    repo.find_task_by_id(task_id)
        .await?
        .ok_or_else(|| anyhow!(CoreError::NotFound(format!("No task found with ID '{}'", task_id))))
}
