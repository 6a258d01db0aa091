//! Front-matter loading for guard invocations.
//!
//! The loader never errors: any failure along the id-resolution, document
//! read, or parse path collapses to `None`, and the guard entry points
//! decide how "no metadata" fails closed.

use crate::document::domain::{ParsedDocument, TaskFrontmatter, TaskId, parse_document};
use crate::document::ports::TaskRepository;
use crate::policy::domain::GuardContext;
use std::path::Path;

/// Loads the acting task's front-matter for a guard invocation.
///
/// Resolves the task id from the context (`task_id` → `entity_id` →
/// `task.id`), reads the document through the repository honouring the
/// context's project-root override, and parses the front-matter block.
/// Returns `None` when no id resolves or any step fails.
pub async fn load_task_frontmatter<R>(repository: &R, ctx: &GuardContext) -> Option<TaskFrontmatter>
where
    R: TaskRepository,
{
    let id = ctx.resolved_task_id()?;
    let root = ctx.resolved_project_root();
    load_frontmatter(repository, root.as_deref(), &id).await
}

/// Loads one task's front-matter by id, collapsing every failure to `None`.
pub async fn load_frontmatter<R>(
    repository: &R,
    root: Option<&Path>,
    id: &TaskId,
) -> Option<TaskFrontmatter>
where
    R: TaskRepository,
{
    let content = repository.read_document(root, id).await.ok()?;
    parse_document(&content)
        .ok()
        .map(ParsedDocument::into_frontmatter)
}
