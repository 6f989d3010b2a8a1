//! Task controller.

use crate::{
    responses::{created, no_content, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use tasklane_core::{Task, TaskId, TasklaneError};
use tasklane_service::{CreateTaskRequest, GenerateTasksQuery, GenerateTasksResponse};
use tracing::debug;

/// Header telling clients whether the task list came from the cache.
pub const X_CACHE_HIT: HeaderName = HeaderName::from_static("x-cache-hit");

/// Creates the task router.
///
/// The collection is served both with and without a trailing slash.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/tasks",
            get(list_tasks).post(create_task).delete(delete_all_tasks),
        )
        .route(
            "/api/tasks/",
            get(list_tasks).post(create_task).delete(delete_all_tasks),
        )
        .route("/api/tasks/generate", post(generate_tasks))
        .route("/api/tasks/:id", delete(delete_task))
}

/// List all tasks, newest first.
///
/// The cached body is written out as-is.
async fn list_tasks(State(state): State<AppState>) -> ApiResult<Response> {
    debug!("List tasks request");

    let listing = state.task_service.list().await?;
    let hit = if listing.cache.is_hit() { "true" } else { "false" };

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/json")),
            (X_CACHE_HIT, HeaderValue::from_static(hit)),
        ],
        listing.body,
    )
        .into_response())
}

/// Create a task.
async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let Json(request) = payload?;
    debug!("Create task request: {}", request.title);

    let task = state.task_service.create(request).await?;
    Ok(created(task))
}

/// Delete every task.
async fn delete_all_tasks(State(state): State<AppState>) -> ApiResult<StatusCode> {
    debug!("Delete all tasks request");

    state.task_service.delete_all().await?;
    Ok(no_content())
}

/// Insert a numbered batch of tasks.
///
/// The query never rejects a request: an unreadable query string behaves
/// like an absent `count`.
async fn generate_tasks(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResult<Json<GenerateTasksResponse>> {
    let query = query
        .map(|Query(pairs)| GenerateTasksQuery::from_pairs(pairs))
        .unwrap_or_default();
    debug!("Generate tasks request: {:?}", query.count);

    let response = state.task_service.generate(query).await?;
    Ok(Json(response))
}

/// Delete one task. A missing id is not an error.
async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    debug!("Delete task request: {}", id);

    let task_id = parse_task_id(&id)?;
    state.task_service.delete_one(task_id).await?;
    Ok(no_content())
}

fn parse_task_id(raw: &str) -> Result<TaskId, AppError> {
    raw.parse::<TaskId>()
        .map_err(|_| AppError(TasklaneError::validation(format!("invalid task id: {}", raw))))
}
