//! Task entity.

use crate::{Entity, TaskId};
use serde::{Deserialize, Serialize};

/// A single entry on the task list.
///
/// Tasks are created by the store; the cache only ever holds a serialized
/// snapshot of a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned identifier.
    pub id: TaskId,
    /// Non-empty title.
    pub title: String,
    /// Completion flag.
    pub completed: bool,
}

impl Task {
    /// Creates a task as the store returns it right after insertion.
    #[must_use]
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            completed: false,
        }
    }

    /// Title given to the `n`-th task of a generated batch.
    #[must_use]
    pub fn generated_title(n: u32) -> String {
        format!("Task {}", n)
    }
}

impl Entity<TaskId> for Task {
    fn id(&self) -> &TaskId {
        &self.id
    }
}
