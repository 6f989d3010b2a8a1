//! # Tasklane Repository
//!
//! Durable task storage on SQLite.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn TaskRepository>
//! SqliteTaskRepository
//!   ↓  Arc<dyn DatabasePoolInterface>
//! SQLite
//! ```

pub mod pool;
pub mod sqlite;
pub mod traits;

pub use pool::*;
pub use sqlite::*;
pub use traits::*;
