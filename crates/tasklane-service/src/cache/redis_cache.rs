//! Redis-based cache implementation.

use super::CacheInterface;
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Config, Pool, PoolConfig, Runtime, Timeouts};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tasklane_config::RedisConfig;
use tasklane_core::{HealthCheck, HealthStatus, TasklaneError, TasklaneResult};
use tracing::debug;

/// Builds a Redis connection pool. No connection is opened until first use.
///
/// Waiting for a slot, connecting and recycling are all bounded by the
/// configured command timeout.
pub fn create_redis_pool(config: &RedisConfig) -> TasklaneResult<Arc<Pool>> {
    let timeout = Some(config.command_timeout());
    let mut pool_cfg = PoolConfig::new(config.pool_size as usize);
    pool_cfg.timeouts = Timeouts {
        wait: timeout,
        create: timeout,
        recycle: timeout,
    };

    let mut redis_cfg = Config::from_url(&config.url);
    redis_cfg.pool = Some(pool_cfg);

    let pool = redis_cfg
        .create_pool(Some(Runtime::Tokio1))
        .map_err(|e| TasklaneError::Cache(format!("Failed to create Redis pool: {}", e)))?;
    Ok(Arc::new(pool))
}

/// Redis-based cache service.
#[derive(Clone)]
pub struct RedisCacheService {
    pool: Arc<Pool>,
    command_timeout: Duration,
}

impl RedisCacheService {
    /// Create a new Redis cache service using the default command timeout.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self {
            pool,
            command_timeout: RedisConfig::default().command_timeout(),
        }
    }

    /// Bounds every GET, SET and DEL (connection checkout included) by `timeout`.
    #[must_use]
    pub fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    async fn bounded<T>(
        &self,
        op: &str,
        key: &str,
        fut: impl Future<Output = TasklaneResult<T>>,
    ) -> TasklaneResult<T> {
        tokio::time::timeout(self.command_timeout, fut)
            .await
            .map_err(|_| {
                TasklaneError::Cache(format!(
                    "{} '{}' timed out after {:?}",
                    op, key, self.command_timeout
                ))
            })?
    }

    async fn get_conn(&self) -> TasklaneResult<deadpool_redis::Connection> {
        self.pool
            .get()
            .await
            .map_err(|e| TasklaneError::Cache(format!("Failed to get Redis connection: {}", e)))
    }

    /// Sends `PING`, giving up after `timeout`.
    pub async fn ping(&self, timeout: Duration) -> TasklaneResult<()> {
        let ping = async {
            let mut conn = self.get_conn().await?;
            let _: String = deadpool_redis::redis::cmd("PING")
                .query_async(&mut conn)
                .await
                .map_err(|e| TasklaneError::Cache(format!("PING failed: {}", e)))?;
            Ok(())
        };

        tokio::time::timeout(timeout, ping)
            .await
            .map_err(|_| TasklaneError::Cache(format!("PING timed out after {:?}", timeout)))?
    }
}

impl std::fmt::Debug for RedisCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = self.pool.status();
        f.debug_struct("RedisCacheService")
            .field("size", &status.size)
            .field("available", &status.available)
            .field("command_timeout", &self.command_timeout)
            .finish()
    }
}

#[async_trait]
impl CacheInterface for RedisCacheService {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn get_raw(&self, key: &str) -> TasklaneResult<Option<String>> {
        let value = self
            .bounded("GET", key, async {
                let mut conn = self.get_conn().await?;
                conn.get::<_, Option<String>>(key).await.map_err(|e| {
                    TasklaneError::Cache(format!("Failed to get key '{}': {}", key, e))
                })
            })
            .await?;

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> TasklaneResult<()> {
        let ttl_secs = ttl.as_secs().max(1);

        self.bounded("SET", key, async {
            let mut conn = self.get_conn().await?;
            conn.set_ex::<_, _, ()>(key, value, ttl_secs)
                .await
                .map_err(|e| TasklaneError::Cache(format!("Failed to set key '{}': {}", key, e)))
        })
        .await?;

        debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
        Ok(())
    }

    async fn delete(&self, key: &str) -> TasklaneResult<bool> {
        let deleted = self
            .bounded("DEL", key, async {
                let mut conn = self.get_conn().await?;
                conn.del::<_, i64>(key).await.map_err(|e| {
                    TasklaneError::Cache(format!("Failed to delete key '{}': {}", key, e))
                })
            })
            .await?;

        debug!("Deleted key '{}': {}", key, deleted > 0);
        Ok(deleted > 0)
    }
}

#[async_trait]
impl HealthCheck for RedisCacheService {
    fn name(&self) -> &str {
        "redis"
    }

    /// An unreachable cache degrades the service but does not take it down.
    async fn check(&self) -> HealthStatus {
        match self.ping(Duration::from_secs(2)).await {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Degraded(e.to_string()),
        }
    }
}
