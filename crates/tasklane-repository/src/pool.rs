//! Database connection pool management.

use async_trait::async_trait;
use shaku::Component;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tasklane_config::DatabaseConfig;
use tasklane_core::{HealthCheck, HealthStatus, Interface, TasklaneError, TasklaneResult};
use tracing::{debug, info, warn};

/// How long a writer waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Interface for database pool operations.
#[async_trait]
pub trait DatabasePoolInterface: Interface + Send + Sync {
    /// Returns a reference to the underlying SQLite pool.
    fn inner(&self) -> &SqlitePool;

    /// Checks if the database connection is healthy.
    async fn health_check(&self) -> TasklaneResult<()>;

    /// Runs database migrations.
    async fn run_migrations(&self) -> TasklaneResult<()>;

    /// Closes the database pool.
    async fn close(&self);
}

/// Database pool wrapper.
#[derive(Component)]
#[shaku(interface = DatabasePoolInterface)]
pub struct DatabasePool {
    pool: SqlitePool,
}

impl DatabasePool {
    /// Opens the database described by `config`.
    ///
    /// File databases are created on first use, together with their parent
    /// directory. In-memory databases keep their connections open for the
    /// lifetime of the pool.
    pub async fn new(config: &DatabaseConfig) -> TasklaneResult<Self> {
        info!(url = %config.url, "Opening SQLite database...");

        let options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|e| TasklaneError::Configuration(format!("Invalid database URL: {}", e)))?
            .create_if_missing(true)
            .busy_timeout(BUSY_TIMEOUT);

        let mut pool_options = SqlitePoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout());

        let options = if config.is_in_memory() {
            pool_options = pool_options.idle_timeout(None).max_lifetime(None);
            options
        } else {
            ensure_parent_dir(&options).await?;
            pool_options = pool_options.idle_timeout(Some(config.idle_timeout()));
            options.journal_mode(SqliteJournalMode::Wal)
        };

        let pool = pool_options.connect_with(options).await.map_err(|e| {
            warn!("Failed to open database: {}", e);
            TasklaneError::Database(format!("Failed to connect: {}", e))
        })?;

        info!("SQLite connection pool established");
        Ok(Self { pool })
    }
}

async fn ensure_parent_dir(options: &SqliteConnectOptions) -> TasklaneResult<()> {
    let Some(parent) = options.get_filename().parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }

    debug!(dir = %parent.display(), "Ensuring database directory exists");
    tokio::fs::create_dir_all(parent).await.map_err(|e| {
        TasklaneError::Database(format!(
            "Failed to create database directory {}: {}",
            parent.display(),
            e
        ))
    })
}

#[async_trait]
impl DatabasePoolInterface for DatabasePool {
    fn inner(&self) -> &SqlitePool {
        &self.pool
    }

    async fn health_check(&self) -> TasklaneResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| TasklaneError::Database(format!("Health check failed: {}", e)))?;
        Ok(())
    }

    async fn run_migrations(&self) -> TasklaneResult<()> {
        info!("Running database migrations...");
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| TasklaneError::Database(format!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }

    async fn close(&self) {
        info!("Closing database connection pool...");
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}

#[async_trait]
impl HealthCheck for DatabasePool {
    fn name(&self) -> &str {
        "database"
    }

    async fn check(&self) -> HealthStatus {
        match DatabasePoolInterface::health_check(self).await {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Unhealthy(e.to_string()),
        }
    }
}

impl std::fmt::Debug for DatabasePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabasePool")
            .field("size", &self.pool.size())
            .field("num_idle", &self.pool.num_idle())
            .finish()
    }
}

/// Opens the database and applies pending migrations.
pub async fn create_pool(config: &DatabaseConfig) -> TasklaneResult<Arc<DatabasePool>> {
    let pool = DatabasePool::new(config).await?;
    pool.run_migrations().await?;
    Ok(Arc::new(pool))
}
