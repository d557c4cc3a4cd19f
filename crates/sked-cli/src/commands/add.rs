use anyhow::Result;
use owo_colors::{OwoColorize, Style};
use sked_core::models::TaskPayload;
use sked_core::repository::Repository;
use sked_core::scheduling::prepare_new_task;

use crate::cli::AddCommand;
use crate::parser::parse_date_input;
use crate::util::today;

pub async fn add_task(repo: &impl Repository, command: AddCommand) -> Result<()> {
    let today = today();
    let date = command
        .date
        .as_deref()
        .map(|d| parse_date_input(d, today))
        .transpose()?
        .map(|d| d.to_string())
        .unwrap_or_default();

    let payload = TaskPayload {
        date,
        title: command.title,
        comment: command.comment.unwrap_or_default(),
        repeat: command.repeat.unwrap_or_default(),
        ..TaskPayload::default()
    };
    let data = prepare_new_task(today, payload)?;
    let task = repo.add_task(data).await?;

    let success_style = Style::new().green().bold();
    let info_style = Style::new().blue();

    println!("{} Created task: {}", "✓".style(success_style), task.title.bright_white().bold());
    println!("  {} Task ID: {}", "→".style(info_style), task.id.to_string().yellow());
    println!("  {} Date: {}", "→".style(info_style), task.date.cyan());
    if task.is_recurring() {
        println!("  {} Repeats: {}", "→".style(info_style), task.repeat.cyan());
    }

    Ok(())
}
