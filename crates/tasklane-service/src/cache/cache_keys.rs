//! Cache key names.

/// Key holding the serialized list of every task.
pub const TASKS_ALL: &str = "tasks:all";
