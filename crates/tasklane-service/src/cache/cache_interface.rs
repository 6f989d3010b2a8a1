//! Cache interface trait for abstracted caching operations.

use async_trait::async_trait;
use shaku::Interface;
use std::time::Duration;
use tasklane_core::TasklaneResult;

/// Key-value cache with per-key expiry.
///
/// Values are stored as already-serialized strings. Implementations report
/// unreachable backends as [`TasklaneError::Cache`](tasklane_core::TasklaneError::Cache);
/// deciding whether that matters is up to the caller.
#[async_trait]
pub trait CacheInterface: Interface + Send + Sync {
    /// Get a raw value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_raw(&self, key: &str) -> TasklaneResult<Option<String>>;

    /// Set a raw value in the cache with a TTL.
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> TasklaneResult<()>;

    /// Delete a value from the cache.
    ///
    /// Returns `true` if the key existed and was deleted.
    async fn delete(&self, key: &str) -> TasklaneResult<bool>;

    /// Check if caching is enabled.
    fn is_enabled(&self) -> bool;
}
