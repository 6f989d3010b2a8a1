//! Repository trait definitions.

use async_trait::async_trait;
use tasklane_core::{Interface, Task, TaskId, TasklaneResult};

/// Durable task store.
///
/// Every failure surfaces as [`TasklaneError::Database`](tasklane_core::TasklaneError::Database).
#[async_trait]
pub trait TaskRepository: Interface + Send + Sync {
    /// Lists every task, newest id first.
    async fn list_all(&self) -> TasklaneResult<Vec<Task>>;

    /// Inserts a new, not yet completed task.
    async fn insert(&self, title: &str) -> TasklaneResult<Task>;

    /// Deletes a task. Returns whether a row was removed; a missing id is not an error.
    async fn delete_by_id(&self, id: TaskId) -> TasklaneResult<bool>;

    /// Deletes every task and returns the number of rows removed.
    async fn delete_all(&self) -> TasklaneResult<u64>;

    /// Inserts `count` tasks titled `Task 1` through `Task <count>` in a single
    /// transaction. Titles are produced row by row.
    ///
    /// Either every row is committed before this returns `Ok`, or none is.
    async fn insert_generated(&self, count: u32) -> TasklaneResult<u64>;
}
