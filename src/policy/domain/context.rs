//! The guard call context.

use crate::document::domain::TaskId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Call context delivered to a guard invocation.
///
/// The surrounding tracker passes a loose mapping; only the keys modelled
/// here are meaningful and unknown keys are ignored on deserialisation. The
/// acting task id may arrive under `task_id`, `entity_id`, or nested as
/// `task.id`; blank values fall through to the next candidate.
///
/// # Examples
///
/// ```
/// use happy_stacks::policy::domain::GuardContext;
///
/// let ctx = GuardContext::from_json(r#"{"entity_id": "tsk-042"}"#).expect("valid payload");
/// let id = ctx.resolved_task_id().expect("id present");
/// assert_eq!(id.as_str(), "tsk-042");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    task_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    entity_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    task: Option<ContextTask>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    project_root: Option<PathBuf>,
}

/// The nested `task` object of a call context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextTask {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
}

impl ContextTask {
    /// Creates a nested task object carrying an id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
        }
    }

    /// Returns the nested task id.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl GuardContext {
    /// Creates an empty call context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `task_id` key.
    #[must_use]
    pub fn with_task_id(mut self, task_id: impl Into<String>) -> Self {
        self.task_id = Some(task_id.into());
        self
    }

    /// Sets the `entity_id` key.
    #[must_use]
    pub fn with_entity_id(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }

    /// Sets the nested `task` object.
    #[must_use]
    pub fn with_task(mut self, task: ContextTask) -> Self {
        self.task = Some(task);
        self
    }

    /// Sets the `project_root` key.
    #[must_use]
    pub fn with_project_root(mut self, project_root: impl Into<PathBuf>) -> Self {
        self.project_root = Some(project_root.into());
        self
    }

    /// Parses a call context from the JSON object a hook runner delivers.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] when the payload is not a JSON object
    /// of the expected shape.
    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }

    /// Resolves the acting task id.
    ///
    /// Candidates are checked in order `task_id`, `entity_id`, `task.id`;
    /// blank values are skipped. Returns `None` when no candidate resolves.
    #[must_use]
    pub fn resolved_task_id(&self) -> Option<TaskId> {
        let nested = self.task.as_ref().and_then(ContextTask::id);
        [self.task_id.as_deref(), self.entity_id.as_deref(), nested]
            .into_iter()
            .flatten()
            .find_map(|candidate| TaskId::new(candidate).ok())
    }

    /// Returns the task id to use in remediation text.
    ///
    /// Mirrors the resolution the surrounding tracker applies when
    /// rendering fix commands: only the flat `task_id`/`entity_id` keys are
    /// consulted.
    #[must_use]
    pub fn task_id_hint(&self) -> Option<&str> {
        [self.task_id.as_deref(), self.entity_id.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|candidate| !candidate.is_empty())
    }

    /// Resolves the project root override to an absolute path.
    ///
    /// Blank values and unresolvable paths degrade to `None`, leaving the
    /// repository adapter on its default root.
    #[must_use]
    pub fn resolved_project_root(&self) -> Option<PathBuf> {
        let root = self.project_root.as_deref()?;
        let trimmed = trim_path(root)?;
        std::path::absolute(trimmed).ok()
    }
}

fn trim_path(path: &Path) -> Option<&Path> {
    // Non-UTF-8 roots pass through untouched; blank-filtering only applies
    // to textual values.
    path.to_str().map_or(Some(path), |text| {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Path::new(trimmed))
        }
    })
}
