//! Service implementations.
//!
//! Trait definitions live in the parent module (e.g. `task_service.rs`).

pub mod task_list_cache_impl;
pub mod task_service_impl;

pub use task_list_cache_impl::{TaskListCache, TaskListCacheParameters};
pub use task_service_impl::TaskServiceComponent;
