//! Task-related DTOs.

use serde::{Deserialize, Serialize};
use tasklane_core::{Task, TasklaneResult};
use validator::Validate;

/// Batch size used by `generate` when no usable count is given.
pub const DEFAULT_GENERATE_COUNT: u32 = 1000;

/// Request to create a new task.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    #[serde(default)]
    pub title: String,
}

impl CreateTaskRequest {
    /// Creates a request for the given title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// Query of a bulk-generate request.
///
/// `count` is kept as raw text: anything that is not a positive integer
/// falls back to [`DEFAULT_GENERATE_COUNT`] instead of being rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateTasksQuery {
    #[serde(default)]
    pub count: Option<String>,
}

impl GenerateTasksQuery {
    /// Query with an explicit count.
    #[must_use]
    pub fn with_count(count: impl ToString) -> Self {
        Self {
            count: Some(count.to_string()),
        }
    }

    /// Builds the query from raw `key=value` pairs. A repeated `count`
    /// keeps its first value.
    #[must_use]
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self {
            count: pairs
                .into_iter()
                .find_map(|(key, value)| (key == "count").then_some(value)),
        }
    }

    /// Number of tasks to generate.
    #[must_use]
    pub fn effective_count(&self) -> u32 {
        self.count
            .as_deref()
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_GENERATE_COUNT)
    }
}

/// Result of a bulk-generate request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateTasksResponse {
    pub message: String,
    pub count: u64,
}

impl GenerateTasksResponse {
    /// Response for `count` generated tasks.
    #[must_use]
    pub fn new(count: u64) -> Self {
        Self {
            message: format!("generated {} tasks", count),
            count,
        }
    }
}

/// Where a task listing came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Served from the cache.
    Hit,
    /// Computed from the store.
    Miss,
}

impl CacheStatus {
    /// Returns true for a cache hit.
    #[must_use]
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }
}

/// Serialized task list, newest id first, with its provenance.
///
/// The body is passed through verbatim so a cache hit is never re-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListing {
    pub body: String,
    pub cache: CacheStatus,
}

impl TaskListing {
    /// Listing served from the cache.
    #[must_use]
    pub fn hit(body: String) -> Self {
        Self {
            body,
            cache: CacheStatus::Hit,
        }
    }

    /// Listing computed from the store.
    #[must_use]
    pub fn miss(body: String) -> Self {
        Self {
            body,
            cache: CacheStatus::Miss,
        }
    }

    /// Decodes the body.
    pub fn tasks(&self) -> TasklaneResult<Vec<Task>> {
        Ok(serde_json::from_str(&self.body)?)
    }
}
