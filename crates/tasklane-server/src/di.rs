//! Dependency injection module using Shaku.
//!
//! `TasklaneModule` holds the whole stack. The cache component defaults to
//! [`NoopCacheService`]; when Redis is enabled it is overridden with the
//! [`RedisCacheService`] built at startup.

use shaku::{module, HasComponent};
use std::sync::Arc;
use tasklane_config::CacheConfig;
use tasklane_repository::{
    DatabasePool, DatabasePoolInterface, DatabasePoolParameters, SqliteTaskRepository,
};
use tasklane_service::{
    CacheInterface, NoopCacheService, RedisCacheService, TaskListCache, TaskListCacheParameters,
    TaskService, TaskServiceComponent,
};

module! {
    pub TasklaneModule {
        components = [
            DatabasePool,
            SqliteTaskRepository,
            NoopCacheService,
            TaskListCache,
            TaskServiceComponent,
        ],
        providers = [],
    }
}

/// Builds the application module.
///
/// `db_pool` must already be migrated. Passing `redis` switches the list
/// cache from the no-op implementation to Redis.
pub fn build_module(
    db_pool: &DatabasePool,
    cache_config: &CacheConfig,
    redis: Option<RedisCacheService>,
) -> Arc<TasklaneModule> {
    let mut builder = TasklaneModule::builder()
        .with_component_parameters::<DatabasePool>(DatabasePoolParameters {
            pool: db_pool.inner().clone(),
        })
        .with_component_parameters::<TaskListCache>(TaskListCacheParameters {
            key: cache_config.list_key.clone(),
            ttl: cache_config.list_ttl(),
        });

    if let Some(redis) = redis {
        let cache: Box<dyn CacheInterface> = Box::new(redis);
        builder = builder.with_component_override::<dyn CacheInterface>(cache);
    }

    Arc::new(builder.build())
}

/// Trait for resolving the services the HTTP layer needs.
pub trait ServiceResolver {
    /// Resolves the task service from the module.
    fn task_service(&self) -> Arc<dyn TaskService>;

    /// Resolves the cache backing the task list.
    fn cache(&self) -> Arc<dyn CacheInterface>;
}

impl ServiceResolver for TasklaneModule {
    fn task_service(&self) -> Arc<dyn TaskService> {
        self.resolve()
    }

    fn cache(&self) -> Arc<dyn CacheInterface> {
        self.resolve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasklane_config::DatabaseConfig;
    use tasklane_repository::{create_pool, TaskRepository};
    use tasklane_service::{
        create_redis_pool, CacheStatus, CreateTaskRequest, TaskListCacheInterface,
    };

    #[test]
    fn test_module_provides_every_layer() {
        fn _assert_has<T: HasComponent<dyn TaskService>
            + HasComponent<dyn TaskListCacheInterface>
            + HasComponent<dyn TaskRepository>
            + HasComponent<dyn CacheInterface>
            + HasComponent<dyn DatabasePoolInterface>>() {}

        _assert_has::<TasklaneModule>();
    }

    #[tokio::test]
    async fn test_default_module_uses_noop_cache() {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        let module = build_module(&pool, &CacheConfig::default(), None);

        assert!(!module.cache().is_enabled());

        let service = module.task_service();
        service.create(CreateTaskRequest::new("wired")).await.unwrap();
        let first = service.list().await.unwrap();
        let second = service.list().await.unwrap();

        assert_eq!(first.cache, CacheStatus::Miss);
        assert_eq!(second.cache, CacheStatus::Miss);
        assert_eq!(second.tasks().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_redis_pool_overrides_cache() {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        let redis = tasklane_config::RedisConfig {
            url: "redis://127.0.0.1:1".to_string(),
            ..Default::default()
        };
        let cache = RedisCacheService::new(create_redis_pool(&redis).unwrap())
            .with_command_timeout(redis.command_timeout());
        let module = build_module(&pool, &CacheConfig::default(), Some(cache));

        assert!(module.cache().is_enabled());
        // Unreachable Redis still serves reads from the store.
        let listing = module.task_service().list().await.unwrap();
        assert_eq!(listing.body, "[]");
    }
}
