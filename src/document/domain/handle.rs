//! The resolved-task view returned by repository lookups.

use super::TaskId;
use serde::{Deserialize, Serialize};

/// A task known to the repository, identified by its canonical id.
///
/// The guard layer never mutates tasks; lookups only establish that a task
/// exists and under which id its document is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskHandle {
    id: TaskId,
}

impl TaskHandle {
    /// Creates a handle for the given task id.
    #[must_use]
    pub const fn new(id: TaskId) -> Self {
        Self { id }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }
}
