use crate::date::CalendarDate;
use crate::error::CoreError;
use crate::models::{CompletionResult, NewTaskData, Task, TaskSearch, UpdateTaskData};
use crate::recurrence::next_date;
use crate::repository::query_builder::{build_task_search, TASK_COLUMNS};
use crate::repository::SqliteRepository;
use async_trait::async_trait;
use sqlx::{Sqlite, Transaction};

#[async_trait]
impl super::TaskRepository for SqliteRepository {
    #[tracing::instrument(skip(self), fields(title = %data.title))]
    async fn add_task(&self, data: NewTaskData) -> Result<Task, CoreError> {
        let mut tx = self.pool().begin().await?;

        let task = sqlx::query_as(&format!(
            r#"INSERT INTO scheduler (date, title, comment, repeat)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            TASK_COLUMNS
        ))
        .bind(&data.date)
        .bind(&data.title)
        .bind(&data.comment)
        .bind(&data.repeat)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(task)
    }

    async fn find_task_by_id(&self, id: i64) -> Result<Option<Task>, CoreError> {
        let task = sqlx::query_as(&format!("SELECT {} FROM scheduler WHERE id = $1", TASK_COLUMNS))
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(task)
    }

    #[tracing::instrument(skip(self))]
    async fn find_tasks(&self, search: &TaskSearch, limit: i64) -> Result<Vec<Task>, CoreError> {
        let mut builder = build_task_search(search, limit);
        let tasks = builder.build_query_as::<Task>().fetch_all(self.pool()).await?;
        Ok(tasks)
    }

    #[tracing::instrument(skip(self, data))]
    async fn update_task(&self, id: i64, data: UpdateTaskData) -> Result<Task, CoreError> {
        let mut tx = self.pool().begin().await?;

        let task = sqlx::query_as(&format!(
            r#"UPDATE scheduler
            SET date = $1, title = $2, comment = $3, repeat = $4
            WHERE id = $5
            RETURNING {}
            "#,
            TASK_COLUMNS
        ))
        .bind(&data.date)
        .bind(&data.title)
        .bind(&data.comment)
        .bind(&data.repeat)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

        tx.commit().await?;
        Ok(task)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_task(&self, id: i64) -> Result<Task, CoreError> {
        let mut tx = self.pool().begin().await?;

        let task = sqlx::query_as(&format!("DELETE FROM scheduler WHERE id = $1 RETURNING {}", TASK_COLUMNS))
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

        tx.commit().await?;
        Ok(task)
    }

    #[tracing::instrument(skip(self))]
    async fn complete_task(&self, id: i64) -> Result<CompletionResult, CoreError> {
        let mut tx = self.pool().begin().await?;

        let task = Self::find_task_by_id_in_transaction(&mut tx, id)
            .await?
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

        if !task.is_recurring() {
            sqlx::query("DELETE FROM scheduler WHERE id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            tx.commit().await?;
            tracing::debug!("one-off task removed");
            return Ok(CompletionResult::Removed(task));
        }

        // The task's own date is the reference, so completing advances exactly
        // one occurrence even when the task is overdue.
        let reference = CalendarDate::parse(&task.date)?;
        let next = next_date(reference, &task.date, &task.repeat)?;

        let rescheduled: Task = sqlx::query_as(&format!(
            "UPDATE scheduler SET date = $1 WHERE id = $2 RETURNING {}",
            TASK_COLUMNS
        ))
        .bind(&next)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::debug!(next = %next, "recurring task rescheduled");

        Ok(CompletionResult::Rescheduled {
            task: rescheduled,
            previous_date: task.date,
        })
    }
}

impl SqliteRepository {
    async fn find_task_by_id_in_transaction(
        tx: &mut Transaction<'_, Sqlite>,
        id: i64,
    ) -> Result<Option<Task>, CoreError> {
        let task = sqlx::query_as(&format!("SELECT {} FROM scheduler WHERE id = $1", TASK_COLUMNS))
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?;
        Ok(task)
    }
}
