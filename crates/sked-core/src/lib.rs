//! # Sked Core Library
//!
//! Recurrence date engine and task storage for the sked personal scheduler.
//!
//! ## Core Modules
//!
//! - [`date`]: `YYYYMMDD` calendar dates and the strict "is after" comparison
//! - [`rule`]: the compact recurrence rule grammar (`d`, `y`, `w`, `m`)
//! - [`recurrence`]: next-occurrence search
//! - [`scheduling`]: date normalization applied when a task is saved
//! - [`models`]: tasks and transfer objects
//! - [`db`]: SQLite connection and migrations
//! - [`repository`]: data access layer with the Repository pattern
//! - [`error`]: error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use sked_core::{
//!     date::CalendarDate, db, models::NewTaskData,
//!     repository::{SqliteRepository, TaskRepository},
//!     scheduling::check_date,
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = db::establish_connection("scheduler.db").await?;
//!     let repo = SqliteRepository::new(pool);
//!
//!     let today = CalendarDate::parse("20240110")?;
//!     let task = repo
//!         .add_task(NewTaskData {
//!             date: check_date(today, "20240101", "w 1,4")?,
//!             title: "Gym".to_string(),
//!             repeat: "w 1,4".to_string(),
//!             ..Default::default()
//!         })
//!         .await?;
//!     println!("Gym is next due on {}", task.date);
//!
//!     Ok(())
//! }
//! ```

pub mod date;
pub mod db;
pub mod error;
pub mod models;
pub mod recurrence;
pub mod repository;
pub mod rule;
pub mod scheduling;
