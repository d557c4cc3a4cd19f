use anyhow::Result;
use sked_core::models::{TaskSearch, DEFAULT_TASKS_LIMIT};
use sked_core::repository::Repository;

use crate::cli::ListCommand;
use crate::util::today;
use crate::views::table::display_tasks;

pub async fn list_tasks(repo: &impl Repository, command: ListCommand) -> Result<()> {
    let search = TaskSearch::parse(&command.search);
    let tasks = repo.find_tasks(&search, DEFAULT_TASKS_LIMIT).await?;
    display_tasks(&tasks, today());
    Ok(())
}
