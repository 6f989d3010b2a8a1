//! Common test infrastructure for database integration tests.

use std::sync::Arc;
use tasklane_config::DatabaseConfig;
use tasklane_repository::{create_pool, DatabasePool, DatabasePoolInterface};

/// Private in-memory database with migrations applied.
pub struct TestDatabase {
    pool: Arc<DatabasePool>,
}

impl TestDatabase {
    /// Creates a fresh, migrated database.
    pub async fn new() -> Self {
        let pool = create_pool(&DatabaseConfig::in_memory())
            .await
            .expect("Failed to open in-memory database");
        Self { pool }
    }

    /// Returns a handle to the database pool.
    pub fn pool(&self) -> Arc<DatabasePool> {
        Arc::clone(&self.pool)
    }

    /// Makes every insert of a task titled `title` fail.
    pub async fn fail_inserts_titled(&self, title: &str) {
        let sql = format!(
            "CREATE TRIGGER fail_insert BEFORE INSERT ON tasks \
             WHEN NEW.title = '{}' \
             BEGIN SELECT RAISE(ABORT, 'insert rejected'); END;",
            title.replace('\'', "''")
        );
        sqlx::query(&sql)
            .execute(self.pool.inner())
            .await
            .expect("Failed to create trigger");
    }

    /// Counts rows in the tasks table.
    pub async fn row_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM tasks")
            .fetch_one(self.pool.inner())
            .await
            .expect("Failed to count rows")
    }
}
