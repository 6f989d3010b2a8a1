//! Cache-aside controller implementation.

use crate::cache::cache_metrics::{CacheMetrics, CacheOperation};
use crate::cache::{cache_keys, CacheInterface};
use crate::dto::TaskListing;
use crate::task_list_cache::TaskListCacheInterface;
use async_trait::async_trait;
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tasklane_core::TasklaneResult;
use tasklane_repository::TaskRepository;
use tracing::{debug, warn};

/// Lifetime of the cached task list.
pub const LIST_TTL: Duration = Duration::from_secs(5);

/// Cache-aside controller for the task list aggregate.
#[derive(Component)]
#[shaku(interface = TaskListCacheInterface)]
pub struct TaskListCache {
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
    #[shaku(inject)]
    repository: Arc<dyn TaskRepository>,
    #[shaku(default = cache_keys::TASKS_ALL.to_string())]
    key: String,
    #[shaku(default = LIST_TTL)]
    ttl: Duration,
}

impl TaskListCache {
    /// Creates a controller using the default key and TTL.
    #[must_use]
    pub fn new(cache: Arc<dyn CacheInterface>, repository: Arc<dyn TaskRepository>) -> Self {
        Self::with_settings(cache, repository, cache_keys::TASKS_ALL, LIST_TTL)
    }

    /// Creates a controller with an explicit key and TTL.
    #[must_use]
    pub fn with_settings(
        cache: Arc<dyn CacheInterface>,
        repository: Arc<dyn TaskRepository>,
        key: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self {
            cache,
            repository,
            key: key.into(),
            ttl,
        }
    }
}

#[async_trait]
impl TaskListCacheInterface for TaskListCache {
    async fn get_all_tasks_cached(&self) -> TasklaneResult<TaskListing> {
        match self.cache.get_raw(&self.key).await {
            Ok(Some(body)) => {
                CacheMetrics::hit(&self.key);
                debug!(key = %self.key, "Task list served from cache");
                return Ok(TaskListing::hit(body));
            }
            Ok(None) => {}
            Err(e) => {
                CacheMetrics::error(&self.key, CacheOperation::Get);
                warn!(key = %self.key, error = %e, "Cache read failed, treating as miss");
            }
        }
        CacheMetrics::miss(&self.key);

        let tasks = self.repository.list_all().await?;
        let body = serde_json::to_string(&tasks)?;

        if let Err(e) = self.cache.set_raw(&self.key, &body, self.ttl).await {
            CacheMetrics::error(&self.key, CacheOperation::Set);
            warn!(key = %self.key, error = %e, "Cache write failed");
        }

        debug!(key = %self.key, count = tasks.len(), "Task list served from store");
        Ok(TaskListing::miss(body))
    }

    async fn invalidate_all(&self) {
        match self.cache.delete(&self.key).await {
            Ok(existed) => {
                CacheMetrics::invalidated(&self.key);
                debug!(key = %self.key, existed, "Task list invalidated");
            }
            Err(e) => {
                CacheMetrics::error(&self.key, CacheOperation::Delete);
                warn!(key = %self.key, error = %e, "Cache invalidation failed");
            }
        }
    }
}

impl std::fmt::Debug for TaskListCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskListCache")
            .field("key", &self.key)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;
    use mockall::predicate::eq;
    use tasklane_core::{Task, TaskId, TasklaneError};

    mock! {
        pub Cache {}

        #[async_trait]
        impl CacheInterface for Cache {
            async fn get_raw(&self, key: &str) -> TasklaneResult<Option<String>>;
            async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> TasklaneResult<()>;
            async fn delete(&self, key: &str) -> TasklaneResult<bool>;
            fn is_enabled(&self) -> bool;
        }
    }

    mock! {
        pub Repository {}

        #[async_trait]
        impl TaskRepository for Repository {
            async fn list_all(&self) -> TasklaneResult<Vec<Task>>;
            async fn insert(&self, title: &str) -> TasklaneResult<Task>;
            async fn delete_by_id(&self, id: TaskId) -> TasklaneResult<bool>;
            async fn delete_all(&self) -> TasklaneResult<u64>;
            async fn insert_generated(&self, count: u32) -> TasklaneResult<u64>;
        }
    }

    const ONE_TASK: &str = r#"[{"id":1,"title":"buy milk","completed":false}]"#;

    fn one_task() -> Vec<Task> {
        vec![Task::new(TaskId::new(1), "buy milk")]
    }

    fn controller(cache: MockCache, repository: MockRepository) -> TaskListCache {
        TaskListCache::new(Arc::new(cache), Arc::new(repository))
    }

    #[tokio::test]
    async fn test_hit_returns_cached_body_without_store_access() {
        let mut cache = MockCache::new();
        cache
            .expect_get_raw()
            .with(eq("tasks:all"))
            .returning(|_| Ok(Some("[cached]".to_string())));
        let mut repository = MockRepository::new();
        repository.expect_list_all().never();

        let listing = controller(cache, repository)
            .get_all_tasks_cached()
            .await
            .unwrap();

        assert_eq!(listing, TaskListing::hit("[cached]".to_string()));
    }

    #[tokio::test]
    async fn test_miss_reads_store_and_populates_cache() {
        let mut cache = MockCache::new();
        cache.expect_get_raw().returning(|_| Ok(None));
        cache
            .expect_set_raw()
            .withf(|key, value, ttl| {
                key == "tasks:all" && value == ONE_TASK && *ttl == Duration::from_secs(5)
            })
            .times(1)
            .returning(|_, _, _| Ok(()));
        let mut repository = MockRepository::new();
        repository
            .expect_list_all()
            .times(1)
            .returning(|| Ok(one_task()));

        let listing = controller(cache, repository)
            .get_all_tasks_cached()
            .await
            .unwrap();

        assert_eq!(listing, TaskListing::miss(ONE_TASK.to_string()));
    }

    #[tokio::test]
    async fn test_empty_store_serializes_as_empty_array() {
        let mut cache = MockCache::new();
        cache.expect_get_raw().returning(|_| Ok(None));
        cache.expect_set_raw().returning(|_, _, _| Ok(()));
        let mut repository = MockRepository::new();
        repository.expect_list_all().returning(|| Ok(Vec::new()));

        let listing = controller(cache, repository)
            .get_all_tasks_cached()
            .await
            .unwrap();

        assert_eq!(listing.body, "[]");
    }

    #[tokio::test]
    async fn test_cache_read_failure_is_a_miss() {
        let mut cache = MockCache::new();
        cache
            .expect_get_raw()
            .returning(|_| Err(TasklaneError::Cache("connection refused".to_string())));
        cache.expect_set_raw().returning(|_, _, _| Ok(()));
        let mut repository = MockRepository::new();
        repository.expect_list_all().returning(|| Ok(one_task()));

        let listing = controller(cache, repository)
            .get_all_tasks_cached()
            .await
            .unwrap();

        assert_eq!(listing, TaskListing::miss(ONE_TASK.to_string()));
    }

    #[tokio::test]
    async fn test_cache_write_failure_does_not_fail_read() {
        let mut cache = MockCache::new();
        cache.expect_get_raw().returning(|_| Ok(None));
        cache
            .expect_set_raw()
            .returning(|_, _, _| Err(TasklaneError::Cache("read only".to_string())));
        let mut repository = MockRepository::new();
        repository.expect_list_all().returning(|| Ok(one_task()));

        let listing = controller(cache, repository)
            .get_all_tasks_cached()
            .await
            .unwrap();

        assert_eq!(listing.cache, crate::CacheStatus::Miss);
    }

    #[tokio::test]
    async fn test_store_failure_is_reported_and_nothing_is_cached() {
        let mut cache = MockCache::new();
        cache.expect_get_raw().returning(|_| Ok(None));
        cache.expect_set_raw().never();
        let mut repository = MockRepository::new();
        repository
            .expect_list_all()
            .returning(|| Err(TasklaneError::database("disk I/O error")));

        let err = controller(cache, repository)
            .get_all_tasks_cached()
            .await
            .unwrap_err();

        assert!(err.is_store_error());
    }

    #[tokio::test]
    async fn test_invalidate_deletes_key() {
        let mut cache = MockCache::new();
        cache
            .expect_delete()
            .with(eq("tasks:all"))
            .times(1)
            .returning(|_| Ok(true));

        controller(cache, MockRepository::new())
            .invalidate_all()
            .await;
    }

    #[tokio::test]
    async fn test_invalidate_swallows_cache_failure() {
        let mut cache = MockCache::new();
        cache
            .expect_delete()
            .times(1)
            .returning(|_| Err(TasklaneError::Cache("timeout".to_string())));

        controller(cache, MockRepository::new())
            .invalidate_all()
            .await;
    }

    #[tokio::test]
    async fn test_custom_key_and_ttl() {
        let mut cache = MockCache::new();
        cache
            .expect_get_raw()
            .with(eq("tasks:all:v2"))
            .returning(|_| Ok(None));
        cache
            .expect_set_raw()
            .withf(|key, _, ttl| key == "tasks:all:v2" && *ttl == Duration::from_secs(30))
            .times(1)
            .returning(|_, _, _| Ok(()));
        let mut repository = MockRepository::new();
        repository.expect_list_all().returning(|| Ok(Vec::new()));

        let controller = TaskListCache::with_settings(
            Arc::new(cache),
            Arc::new(repository),
            "tasks:all:v2",
            Duration::from_secs(30),
        );
        controller.get_all_tasks_cached().await.unwrap();
    }
}
