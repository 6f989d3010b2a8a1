//! Shared fixtures for service integration tests.
//!
//! The store is a real in-memory SQLite database; the cache is an in-process
//! map that records every operation so tests can assert on invalidations.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tasklane_config::DatabaseConfig;
use tasklane_core::{Task, TaskId, TasklaneError, TasklaneResult};
use tasklane_repository::{
    create_pool, DatabasePool, DatabasePoolInterface, SqliteTaskRepository, TaskRepository,
};
use tasklane_service::{CacheInterface, TaskListCache, TaskServiceComponent};

/// Ordered record of store and cache operations.
#[derive(Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<String>>>);

impl EventLog {
    pub fn push(&self, event: impl Into<String>) {
        self.0.lock().unwrap().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// In-process cache that never expires on its own; tests call [`InMemoryCache::expire`].
#[derive(Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, String>>,
    deletes: AtomicUsize,
    unavailable: AtomicBool,
    log: EventLog,
}

impl InMemoryCache {
    pub fn with_log(log: EventLog) -> Self {
        Self {
            log,
            ..Self::default()
        }
    }

    /// Simulates the TTL running out.
    pub fn expire(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }

    pub fn entry(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    /// Number of delete calls, successful or not.
    pub fn delete_count(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> TasklaneResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(TasklaneError::Cache("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CacheInterface for InMemoryCache {
    async fn get_raw(&self, key: &str) -> TasklaneResult<Option<String>> {
        self.log.push(format!("cache:get {}", key));
        self.check_available()?;
        Ok(self.entry(key))
    }

    async fn set_raw(&self, key: &str, value: &str, _ttl: Duration) -> TasklaneResult<()> {
        self.log.push(format!("cache:set {}", key));
        self.check_available()?;
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> TasklaneResult<bool> {
        self.log.push(format!("cache:delete {}", key));
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self.entries.lock().unwrap().remove(key).is_some())
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

/// Repository wrapper that logs each write once it has returned.
pub struct RecordingRepository {
    inner: Arc<dyn TaskRepository>,
    log: EventLog,
    write_delay: Duration,
}

impl RecordingRepository {
    pub fn new(inner: Arc<dyn TaskRepository>, log: EventLog) -> Self {
        Self {
            inner,
            log,
            write_delay: Duration::ZERO,
        }
    }

    /// Delays every write before it reaches the store.
    pub fn with_write_delay(mut self, delay: Duration) -> Self {
        self.write_delay = delay;
        self
    }

    async fn delay(&self) {
        if !self.write_delay.is_zero() {
            tokio::time::sleep(self.write_delay).await;
        }
    }
}

#[async_trait]
impl TaskRepository for RecordingRepository {
    async fn list_all(&self) -> TasklaneResult<Vec<Task>> {
        let tasks = self.inner.list_all().await?;
        self.log.push("store:list_all");
        Ok(tasks)
    }

    async fn insert(&self, title: &str) -> TasklaneResult<Task> {
        self.delay().await;
        let task = self.inner.insert(title).await?;
        self.log.push("store:insert");
        Ok(task)
    }

    async fn delete_by_id(&self, id: TaskId) -> TasklaneResult<bool> {
        self.delay().await;
        let removed = self.inner.delete_by_id(id).await?;
        self.log.push("store:delete_by_id");
        Ok(removed)
    }

    async fn delete_all(&self) -> TasklaneResult<u64> {
        self.delay().await;
        let removed = self.inner.delete_all().await?;
        self.log.push("store:delete_all");
        Ok(removed)
    }

    async fn insert_generated(&self, count: u32) -> TasklaneResult<u64> {
        self.delay().await;
        let inserted = self.inner.insert_generated(count).await?;
        self.log.push("store:insert_generated");
        Ok(inserted)
    }
}

/// Fully wired service over an in-memory database and cache.
pub struct Harness {
    pub service: TaskServiceComponent,
    pub cache: Arc<InMemoryCache>,
    pub pool: Arc<DatabasePool>,
    pub log: EventLog,
}

impl Harness {
    pub async fn new() -> Self {
        Self::with_write_delay(Duration::ZERO).await
    }

    pub async fn with_write_delay(delay: Duration) -> Self {
        let pool = create_pool(&DatabaseConfig::in_memory())
            .await
            .expect("Failed to open in-memory database");
        let log = EventLog::default();
        let cache = Arc::new(InMemoryCache::with_log(log.clone()));
        let store: Arc<dyn TaskRepository> = Arc::new(SqliteTaskRepository::new(pool.clone()));
        let repository: Arc<dyn TaskRepository> =
            Arc::new(RecordingRepository::new(store, log.clone()).with_write_delay(delay));
        let list_cache = Arc::new(TaskListCache::new(cache.clone(), repository.clone()));

        Self {
            service: TaskServiceComponent::new(repository, list_cache),
            cache,
            pool,
            log,
        }
    }

    /// Store content, newest first, read directly from SQLite.
    pub async fn store_tasks(&self) -> Vec<Task> {
        SqliteTaskRepository::new(self.pool.clone())
            .list_all()
            .await
            .expect("Failed to read store")
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
}
