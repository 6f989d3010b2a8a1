//! SQLite repository implementations.

mod task_repository;

pub use task_repository::SqliteTaskRepository;
