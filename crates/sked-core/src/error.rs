use thiserror::Error;

use crate::rule::ParseError;

/// Failure of a single next-date computation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecurrenceError {
    #[error(transparent)]
    Rule(#[from] ParseError),

    #[error("invalid date '{0}': expected YYYYMMDD")]
    InvalidDateFormat(String),

    #[error("no matching date found within {steps} steps")]
    SearchExhausted { steps: usize },
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("Migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("Task not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Recurrence(#[from] RecurrenceError),
}

impl From<ParseError> for CoreError {
    fn from(err: ParseError) -> Self {
        CoreError::Recurrence(err.into())
    }
}
