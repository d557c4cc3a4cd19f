use anyhow::Result;
use owo_colors::OwoColorize;
use sked_core::models::TaskPayload;
use sked_core::repository::Repository;
use sked_core::scheduling::prepare_update;

use crate::cli::EditCommand;
use crate::parser::parse_date_input;
use crate::util::{resolve_task, today};

pub async fn edit_task(repo: &impl Repository, command: EditCommand) -> Result<()> {
    let today = today();
    let task = resolve_task(repo, &command.id).await?;

    let date = match command.date {
        Some(input) => parse_date_input(&input, today)?.to_string(),
        None => task.date,
    };

    let repeat = if command.repeat_clear {
        String::new()
    } else {
        command.repeat.unwrap_or(task.repeat)
    };

    let payload = TaskPayload {
        id: task.id.to_string(),
        date,
        title: command.title.unwrap_or(task.title),
        comment: command.comment.unwrap_or(task.comment),
        repeat,
    };
    let (id, data) = prepare_update(today, payload)?;
    let updated = repo.update_task(id, data).await?;

    println!(
        "Updated task {}: '{}' on {}",
        updated.id.to_string().yellow(),
        updated.title,
        updated.date.cyan()
    );
    Ok(())
}
