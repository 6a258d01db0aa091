//! Filesystem repository for task documents.

use async_trait::async_trait;
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use std::io;
use std::path::{Path, PathBuf};

use crate::document::{
    domain::{TaskHandle, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Directory under the project root holding task documents.
const TASKS_DIR: &str = ".edison/tasks";

/// Task repository backed by `<root>/.edison/tasks/<id>.md` documents.
///
/// All reads go through a capability-scoped [`Dir`] handle opened at the
/// project root, so a hostile id cannot address documents outside the root.
#[derive(Debug, Clone, Default)]
pub struct FsTaskRepository {
    default_root: Option<PathBuf>,
}

impl FsTaskRepository {
    /// Creates a repository resolving against the process working directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository with a default project root.
    #[must_use]
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            default_root: Some(root.into()),
        }
    }

    fn open_root(&self, root: Option<&Path>) -> io::Result<Dir> {
        let resolved = root.map_or_else(
            || {
                self.default_root
                    .clone()
                    .unwrap_or_else(|| PathBuf::from("."))
            },
            Path::to_path_buf,
        );
        Dir::open_ambient_dir(resolved, ambient_authority())
    }
}

fn document_path(id: &TaskId) -> String {
    format!("{TASKS_DIR}/{id}.md")
}

#[async_trait]
impl TaskRepository for FsTaskRepository {
    async fn find(
        &self,
        root: Option<&Path>,
        id: &TaskId,
    ) -> TaskRepositoryResult<Option<TaskHandle>> {
        let dir = match self.open_root(root) {
            Ok(dir) => dir,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(TaskRepositoryError::storage(err)),
        };

        match dir.try_exists(document_path(id)) {
            Ok(true) => Ok(Some(TaskHandle::new(id.clone()))),
            Ok(false) => Ok(None),
            Err(err) => Err(TaskRepositoryError::storage(err)),
        }
    }

    async fn read_document(&self, root: Option<&Path>, id: &TaskId) -> TaskRepositoryResult<String> {
        let dir = match self.open_root(root) {
            Ok(dir) => dir,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(TaskRepositoryError::NotFound(id.clone()));
            }
            Err(err) => return Err(TaskRepositoryError::storage(err)),
        };

        match dir.read_to_string(document_path(id)) {
            Ok(content) => Ok(content),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(TaskRepositoryError::NotFound(id.clone()))
            }
            Err(err) => Err(TaskRepositoryError::storage(err)),
        }
    }
}
