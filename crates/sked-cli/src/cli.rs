use clap::{Parser, Subcommand};

/// A personal task scheduler with repeating tasks
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the HTTP API and web front-end
    Serve(ServeCommand),
    /// Compute the next occurrence of a repeat rule
    NextDate(NextDateCommand),
    /// Add a new task
    Add(AddCommand),
    /// List upcoming tasks
    List(ListCommand),
    /// Show a single task
    Show(ShowCommand),
    /// Edit a task
    Edit(EditCommand),
    /// Mark a task as done
    Done(DoneCommand),
    /// Delete a task
    Delete(DeleteCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeCommand {
    /// Port to listen on, overriding the configuration
    #[clap(short, long)]
    pub port: Option<u16>,
}

#[derive(Parser, Debug, Clone)]
pub struct NextDateCommand {
    /// Reference date (YYYYMMDD); defaults to today
    #[clap(long)]
    pub now: Option<String>,
    /// Start date of the series (YYYYMMDD)
    #[clap(long)]
    pub date: String,
    /// Repeat rule, e.g. "d 7", "y", "w 1,5" or "m -1 2"
    #[clap(long)]
    pub repeat: String,
}

#[derive(Parser, Debug, Clone)]
pub struct AddCommand {
    /// The title of the task
    pub title: String,
    /// Due date as YYYYMMDD or a phrase like "tomorrow"
    #[clap(short, long)]
    pub date: Option<String>,
    /// A free-form comment
    #[clap(short, long)]
    pub comment: Option<String>,
    /// Repeat rule, e.g. "d 7", "y", "w 1,5" or "m -1 2"
    #[clap(short, long)]
    pub repeat: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ListCommand {
    /// Text to search for, or a DD.MM.YYYY date
    #[clap(default_value = "")]
    pub search: String,
}

#[derive(Parser, Debug, Clone)]
pub struct ShowCommand {
    /// The ID of the task
    pub id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct EditCommand {
    /// The ID of the task to edit
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub date: Option<String>,

    #[arg(long)]
    pub comment: Option<String>,

    #[arg(long)]
    pub repeat: Option<String>,
    #[arg(long, conflicts_with = "repeat", help = "Remove the repeat rule (make a one-off task)")]
    pub repeat_clear: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DoneCommand {
    /// The ID of the task to mark as done
    pub id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    /// The ID of the task to delete
    pub id: String,
    /// Force deletion without confirmation
    #[clap(short, long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_next_date() {
        let cli = Cli::parse_from(["sked", "next-date", "--date", "20240101", "--repeat", "d 3"]);
        match cli.command {
            Commands::NextDate(cmd) => {
                assert_eq!(cmd.now, None);
                assert_eq!(cmd.date, "20240101");
                assert_eq!(cmd.repeat, "d 3");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_repeat_and_repeat_clear_conflict() {
        let result = Cli::try_parse_from(["sked", "edit", "1", "--repeat", "y", "--repeat-clear"]);
        assert!(result.is_err());
    }
}
