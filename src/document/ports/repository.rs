//! Repository port for task document lookup and retrieval.

use crate::document::domain::{TaskHandle, TaskId};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task document lookup contract.
///
/// Lookups accept a per-call project-root override from the guard context;
/// adapters resolve `root` against their own default when it is `None`.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Storage`] when the backing store
    /// cannot be queried.
    async fn find(
        &self,
        root: Option<&Path>,
        id: &TaskId,
    ) -> TaskRepositoryResult<Option<TaskHandle>>;

    /// Reads the full text of a task's backing document.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when no document exists for
    /// the id, or [`TaskRepositoryError::Storage`] when the read fails.
    async fn read_document(&self, root: Option<&Path>, id: &TaskId) -> TaskRepositoryResult<String>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// No document exists for the task id.
    #[error("task document not found: {0}")]
    NotFound(TaskId),

    /// Storage-layer failure.
    #[error("storage error: {0}")]
    Storage(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a storage error.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Arc::new(err))
    }
}
