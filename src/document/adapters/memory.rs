//! In-memory repository for guard policy tests and embedding.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, RwLock};

use crate::document::{
    domain::{TaskHandle, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Holds one document text per task id. The per-call root override is
/// ignored: the in-memory store is single-tenant.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<HashMap<TaskId, String>>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a task document.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Storage`] when the store lock is
    /// poisoned.
    pub fn insert(&self, id: TaskId, document: impl Into<String>) -> TaskRepositoryResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| TaskRepositoryError::storage(std::io::Error::other(err.to_string())))?;
        state.insert(id, document.into());
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn find(
        &self,
        _root: Option<&Path>,
        id: &TaskId,
    ) -> TaskRepositoryResult<Option<TaskHandle>> {
        let state = self
            .state
            .read()
            .map_err(|err| TaskRepositoryError::storage(std::io::Error::other(err.to_string())))?;
        Ok(state
            .contains_key(id)
            .then(|| TaskHandle::new(id.clone())))
    }

    async fn read_document(
        &self,
        _root: Option<&Path>,
        id: &TaskId,
    ) -> TaskRepositoryResult<String> {
        let state = self
            .state
            .read()
            .map_err(|err| TaskRepositoryError::storage(std::io::Error::other(err.to_string())))?;
        state
            .get(id)
            .cloned()
            .ok_or_else(|| TaskRepositoryError::NotFound(id.clone()))
    }
}
