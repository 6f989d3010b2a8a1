//! Task service implementation.

use crate::dto::{CreateTaskRequest, GenerateTasksQuery, GenerateTasksResponse, TaskListing};
use crate::task_list_cache::TaskListCacheInterface;
use crate::task_service::TaskService;
use async_trait::async_trait;
use shaku::Component;
use std::future::Future;
use std::sync::Arc;
use tasklane_core::{Task, TaskId, TasklaneError, TasklaneResult, ValidateExt};
use tasklane_repository::TaskRepository;
use tracing::{debug, info};

/// DI-managed task service.
#[derive(Component)]
#[shaku(interface = TaskService)]
pub struct TaskServiceComponent {
    #[shaku(inject)]
    repository: Arc<dyn TaskRepository>,
    #[shaku(inject)]
    list_cache: Arc<dyn TaskListCacheInterface>,
}

impl TaskServiceComponent {
    /// Creates a new task service.
    #[must_use]
    pub fn new(
        repository: Arc<dyn TaskRepository>,
        list_cache: Arc<dyn TaskListCacheInterface>,
    ) -> Self {
        Self {
            repository,
            list_cache,
        }
    }

    /// Runs `write` against the store and, if it succeeds, invalidates the
    /// cached list.
    ///
    /// Both steps run on a spawned task, so dropping the caller's future
    /// cannot leave a committed write without its invalidation.
    async fn mutate<T, F, Fut>(&self, operation: &'static str, write: F) -> TasklaneResult<T>
    where
        T: Send + 'static,
        F: FnOnce(Arc<dyn TaskRepository>) -> Fut + Send + 'static,
        Fut: Future<Output = TasklaneResult<T>> + Send + 'static,
    {
        let repository = Arc::clone(&self.repository);
        let list_cache = Arc::clone(&self.list_cache);

        tokio::spawn(async move {
            let value = write(repository).await?;
            list_cache.invalidate_all().await;
            Ok::<T, TasklaneError>(value)
        })
        .await
        .map_err(|e| TasklaneError::internal(format!("{} aborted: {}", operation, e)))?
    }
}

#[async_trait]
impl TaskService for TaskServiceComponent {
    async fn list(&self) -> TasklaneResult<TaskListing> {
        debug!("Listing tasks");
        self.list_cache.get_all_tasks_cached().await
    }

    async fn create(&self, request: CreateTaskRequest) -> TasklaneResult<Task> {
        debug!("Creating task: {}", request.title);

        request.validate_request()?;

        let title = request.title;
        let task = self
            .mutate("create", move |repository| async move {
                repository.insert(&title).await
            })
            .await?;

        info!("Task created: {}", task.id);
        Ok(task)
    }

    async fn delete_one(&self, id: TaskId) -> TasklaneResult<()> {
        debug!("Deleting task: {}", id);

        let removed = self
            .mutate("delete", move |repository| async move {
                repository.delete_by_id(id).await
            })
            .await?;

        info!(removed, "Task deleted: {}", id);
        Ok(())
    }

    async fn delete_all(&self) -> TasklaneResult<()> {
        debug!("Deleting all tasks");

        let removed = self
            .mutate("delete_all", |repository| async move {
                repository.delete_all().await
            })
            .await?;

        info!("Deleted {} tasks", removed);
        Ok(())
    }

    async fn generate(&self, query: GenerateTasksQuery) -> TasklaneResult<GenerateTasksResponse> {
        let count = query.effective_count();
        debug!("Generating {} tasks", count);

        let inserted = self
            .mutate("generate", move |repository| async move {
                repository.insert_generated(count).await
            })
            .await?;

        info!("Generated {} tasks", inserted);
        Ok(GenerateTasksResponse::new(inserted))
    }
}

impl std::fmt::Debug for TaskServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskServiceComponent").finish_non_exhaustive()
    }
}
