//! SQLite task repository implementation.

use crate::{traits::TaskRepository, DatabasePoolInterface};
use async_trait::async_trait;
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tasklane_core::{Task, TaskId, TasklaneResult};
use tracing::debug;

/// SQLite task repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = TaskRepository)]
pub struct SqliteTaskRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl SqliteTaskRepository {
    /// Creates a new SQLite task repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a task.
#[derive(Debug, FromRow)]
struct TaskRow {
    id: i64,
    title: String,
    completed: bool,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Self {
            id: TaskId::new(row.id),
            title: row.title,
            completed: row.completed,
        }
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    async fn list_all(&self) -> TasklaneResult<Vec<Task>> {
        debug!("Listing all tasks");

        let rows = sqlx::query_as::<_, TaskRow>(
            "SELECT id, title, completed FROM tasks ORDER BY id DESC",
        )
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(Task::from).collect())
    }

    async fn insert(&self, title: &str) -> TasklaneResult<Task> {
        debug!("Inserting task: {}", title);

        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            INSERT INTO tasks (title, completed)
            VALUES (?, 0)
            RETURNING id, title, completed
            "#,
        )
        .bind(title)
        .fetch_one(self.pool.inner())
        .await?;

        Ok(row.into())
    }

    async fn delete_by_id(&self, id: TaskId) -> TasklaneResult<bool> {
        debug!("Deleting task: {}", id);

        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all(&self) -> TasklaneResult<u64> {
        debug!("Deleting all tasks");

        let result = sqlx::query("DELETE FROM tasks")
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected())
    }

    async fn insert_generated(&self, count: u32) -> TasklaneResult<u64> {
        debug!("Inserting batch of {} generated tasks", count);

        // Dropping `tx` without commit rolls the whole batch back, including
        // when this future is dropped mid-loop.
        let mut tx = self.pool.inner().begin().await?;

        for n in 1..=count {
            sqlx::query("INSERT INTO tasks (title, completed) VALUES (?, 0)")
                .bind(Task::generated_title(n))
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(u64::from(count))
    }
}
