//! Cache that stores nothing.

use super::CacheInterface;
use async_trait::async_trait;
use shaku::Component;
use std::time::Duration;
use tasklane_core::TasklaneResult;

/// Cache used when Redis is disabled. Every read is a miss.
#[derive(Component, Debug, Default, Clone, Copy)]
#[shaku(interface = CacheInterface)]
pub struct NoopCacheService {}

#[async_trait]
impl CacheInterface for NoopCacheService {
    async fn get_raw(&self, _key: &str) -> TasklaneResult<Option<String>> {
        Ok(None)
    }

    async fn set_raw(&self, _key: &str, _value: &str, _ttl: Duration) -> TasklaneResult<()> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> TasklaneResult<bool> {
        Ok(false)
    }

    fn is_enabled(&self) -> bool {
        false
    }
}
