use anyhow::Result;
use sked_core::repository::Repository;

use crate::cli::ShowCommand;
use crate::util::{resolve_task, today};
use crate::views::table::display_task;

pub async fn show_task(repo: &impl Repository, command: ShowCommand) -> Result<()> {
    let task = resolve_task(repo, &command.id).await?;
    display_task(&task, today());
    Ok(())
}
