use crate::db::DbPool;
use crate::error::CoreError;
use crate::models::{CompletionResult, NewTaskData, Task, TaskSearch, UpdateTaskData};
use async_trait::async_trait;

pub mod query_builder;
pub mod tasks;

/// Domain-specific trait for task operations
#[async_trait]
pub trait TaskRepository {
    async fn add_task(&self, data: NewTaskData) -> Result<Task, CoreError>;
    async fn find_task_by_id(&self, id: i64) -> Result<Option<Task>, CoreError>;
    async fn find_tasks(&self, search: &TaskSearch, limit: i64) -> Result<Vec<Task>, CoreError>;
    async fn update_task(&self, id: i64, data: UpdateTaskData) -> Result<Task, CoreError>;
    async fn delete_task(&self, id: i64) -> Result<Task, CoreError>;
    /// Deletes a one-off task, or moves a recurring one to its next occurrence.
    async fn complete_task(&self, id: i64) -> Result<CompletionResult, CoreError>;
}

/// Main repository trait; front-ends depend on this rather than the SQLite type.
pub trait Repository: TaskRepository + Send + Sync {}

impl<T: TaskRepository + Send + Sync> Repository for T {}

/// SQLite implementation of the repository pattern
#[derive(Clone)]
pub struct SqliteRepository {
    pool: DbPool,
}

impl SqliteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the database pool for internal use across modules
    pub(crate) fn pool(&self) -> &DbPool {
        &self.pool
    }
}
