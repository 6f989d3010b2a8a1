//! Cache-aside controller for the task list.

use crate::dto::TaskListing;
use async_trait::async_trait;
use tasklane_core::{Interface, TasklaneResult};

/// Keeps the cached task list in step with the store.
///
/// Cache failures never escape this layer: a failed read counts as a miss,
/// a failed write or delete is logged and dropped.
#[async_trait]
pub trait TaskListCacheInterface: Interface + Send + Sync {
    /// Returns the serialized task list, from the cache when present.
    ///
    /// On a miss the list is read from the store and written back to the
    /// cache. Only store failures are reported.
    async fn get_all_tasks_cached(&self) -> TasklaneResult<TaskListing>;

    /// Drops the cached task list.
    ///
    /// Must only be called after the corresponding store write committed.
    async fn invalidate_all(&self);
}
