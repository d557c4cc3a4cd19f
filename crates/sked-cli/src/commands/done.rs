use anyhow::Result;
use owo_colors::OwoColorize;
use sked_core::models::CompletionResult;
use sked_core::repository::Repository;
use sked_core::scheduling::parse_task_id;

use crate::cli::DoneCommand;

pub async fn done_task(repo: &impl Repository, command: DoneCommand) -> Result<()> {
    let task_id = parse_task_id(&command.id)?;

    match repo.complete_task(task_id).await? {
        CompletionResult::Removed(task) => {
            println!("Completed task: '{}'", task.title);
        }
        CompletionResult::Rescheduled { task, previous_date } => {
            println!("Completed task: '{}' ({})", task.title, previous_date);
            println!(
                "Next occurrence of '{}' is on {}",
                task.title,
                task.date.cyan()
            );
        }
    }

    Ok(())
}
