//! Caching infrastructure for the service layer.
//!
//! The cache is advisory: callers above [`TaskListCache`](crate::TaskListCache)
//! never see its failures. Two implementations exist, a Redis-backed one and
//! a no-op one used when Redis is disabled.

mod cache_interface;
pub mod cache_keys;
pub mod cache_metrics;
mod noop_cache;
mod redis_cache;

pub use cache_interface::CacheInterface;
pub use noop_cache::NoopCacheService;
pub use redis_cache::{create_redis_pool, RedisCacheService};
