use clap::Parser;
use owo_colors::{OwoColorize, Style};
use sked_core::db;
use sked_core::error::{CoreError, RecurrenceError};
use sked_core::repository::SqliteRepository;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod config;
mod parser;
mod server;
mod util;
mod views;

use cli::{Cli, Commands};
use config::Config;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let (config, config_error) = match Config::new() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    init_tracing(&config);
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "Invalid configuration, using defaults");
    }

    if let Err(e) = run(cli, config).await {
        handle_error(e);
        std::process::exit(1);
    }
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve(command) => commands::serve::serve(config, command).await,
        Commands::NextDate(command) => commands::next_date::print_next_date(command),
        command => run_with_repository(command, &config).await,
    }
}

async fn run_with_repository(command: Commands, config: &Config) -> anyhow::Result<()> {
    let pool = db::establish_connection(&config.dbfile).await?;
    let repository = SqliteRepository::new(pool.clone());

    let result = match command {
        Commands::Add(command) => commands::add::add_task(&repository, command).await,
        Commands::List(command) => commands::list::list_tasks(&repository, command).await,
        Commands::Show(command) => commands::show::show_task(&repository, command).await,
        Commands::Edit(command) => commands::edit::edit_task(&repository, command).await,
        Commands::Done(command) => commands::done::done_task(&repository, command).await,
        Commands::Delete(command) => commands::delete::delete_task(&repository, command).await,
        Commands::Serve(_) | Commands::NextDate(_) => Ok(()),
    };

    pool.close().await;
    result
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::NotFound(s) => {
                eprintln!("{} {}", "Error:".style(error_style), s);
            }
            CoreError::InvalidInput(s) => {
                eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
            }
            CoreError::Recurrence(e) => {
                eprintln!("{} {}", "Error:".style(error_style), e.yellow());
            }
            CoreError::Database(e) => {
                eprintln!("{} Database error: {}", "Error:".style(error_style), e);
            }
            _ => eprintln!("{} {}", "Error:".style(error_style), err),
        }
    } else if let Some(recurrence_error) = err.downcast_ref::<RecurrenceError>() {
        eprintln!("{} {}", "Error:".style(error_style), recurrence_error.yellow());
    } else {
        eprintln!("{} {:#}", "Error:".style(error_style), err);
    }
}
