//! Task service trait definition.

use crate::dto::{CreateTaskRequest, GenerateTasksQuery, GenerateTasksResponse, TaskListing};
use async_trait::async_trait;
use tasklane_core::{Interface, Task, TaskId, TasklaneResult};

/// Task service trait.
///
/// Mutations commit to the store first and invalidate the cached list
/// afterwards. A failed store write leaves the cache untouched.
#[async_trait]
pub trait TaskService: Interface + Send + Sync {
    /// Lists all tasks, newest first.
    async fn list(&self) -> TasklaneResult<TaskListing>;

    /// Creates a task. Fails with a validation error for an empty title.
    async fn create(&self, request: CreateTaskRequest) -> TasklaneResult<Task>;

    /// Deletes a task. Deleting a missing id succeeds.
    async fn delete_one(&self, id: TaskId) -> TasklaneResult<()>;

    /// Deletes every task.
    async fn delete_all(&self) -> TasklaneResult<()>;

    /// Inserts `Task 1` through `Task N` in one transaction.
    async fn generate(&self, query: GenerateTasksQuery) -> TasklaneResult<GenerateTasksResponse>;
}
