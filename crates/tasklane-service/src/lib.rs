//! # Tasklane Service
//!
//! Task use cases and the cache-aside controller for the task list.
//!
//! Reads go cache first and fall back to the store. Writes go store first
//! and invalidate the cached list once the write is committed.

pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod task_list_cache;
pub mod task_service;

pub use cache::*;
pub use dto::*;
pub use r#impl::{TaskListCache, TaskListCacheParameters, TaskServiceComponent};
pub use task_list_cache::*;
pub use task_service::*;
