//! Individual Happy Stacks rule checkers.
//!
//! Each rule validates one aspect of a task against the policy and returns
//! `Ok(())` on success or the specific [`GuardViolation`] on failure. The
//! parent-structure rule additionally consults the repository for the parent
//! document and may surface repository errors through [`GuardError`].

use crate::document::domain::{TaskFrontmatter, TaskId, TaskKind};
use crate::document::ports::TaskRepository;
use crate::policy::domain::{GuardContext, GuardViolation};
use crate::policy::ports::{Environment, active_stack, component_dir};
use crate::policy::services::guard::GuardError;
use crate::policy::services::loader;

/// Path segment every component directory override must route through.
///
/// Overrides outside this area address default checkouts, which Happy Stacks
/// refuses to operate on.
pub const WORKTREE_PATH_SEGMENT: &str = "/components/.worktrees/";

/// Enforces that the guard runs inside the task's declared stack context.
///
/// Parent tasks are planning umbrellas that may span multiple tracks and
/// stacks; they are exempt here (and rejected outright by the structure
/// rule), so no arbitrary stack is forced on them.
///
/// # Errors
///
/// Returns a [`GuardViolation`] when the task declares no `stack`, no stack
/// is active in the environment, or the two disagree.
pub fn require_stack_context(
    environment: &impl Environment,
    frontmatter: &TaskFrontmatter,
) -> Result<(), GuardViolation> {
    if frontmatter.kind() == Some(TaskKind::Parent) {
        return Ok(());
    }

    let Some(task_stack) = frontmatter.stack() else {
        return Err(GuardViolation::MissingTaskStack);
    };
    let Some(env_stack) = active_stack(environment) else {
        return Err(GuardViolation::missing_stack_context(task_stack));
    };
    if env_stack != task_stack {
        return Err(GuardViolation::stack_mismatch(env_stack, task_stack));
    }
    Ok(())
}

/// Enforces the base scaffolding metadata for the task's kind.
///
/// Parent tasks are planning roots; their `base_task` link is optional.
/// Track and component tasks must carry `base_task`, and component tasks
/// additionally `base_worktree`.
///
/// # Errors
///
/// Returns a [`GuardViolation`] when `hs_kind` is missing/invalid or a
/// required key is absent.
pub fn require_base_metadata(
    ctx: &GuardContext,
    frontmatter: &TaskFrontmatter,
) -> Result<(), GuardViolation> {
    let Some(kind) = frontmatter.kind() else {
        return Err(GuardViolation::InvalidKind);
    };
    if kind == TaskKind::Parent {
        return Ok(());
    }

    if frontmatter.base_task().is_none() {
        return Err(GuardViolation::missing_base_task(ctx.task_id_hint()));
    }
    if kind == TaskKind::Component && frontmatter.base_worktree().is_none() {
        return Err(GuardViolation::missing_base_worktree(ctx.task_id_hint()));
    }
    Ok(())
}

/// Enforces that every declared component resolves to a worktree checkout.
///
/// Editing default component checkouts is disallowed in Happy Stacks, so
/// each component's directory override must be set and must point into the
/// worktree area.
///
/// # Errors
///
/// Returns a [`GuardViolation`] when the task is not worktree-scoped,
/// declares no components (or a component task targets more than one), or
/// any override is missing or addresses a default checkout.
pub fn require_worktree_component_dirs(
    environment: &impl Environment,
    frontmatter: &TaskFrontmatter,
) -> Result<(), GuardViolation> {
    let components = declared_components(frontmatter)?;
    if components.is_empty() {
        return Err(GuardViolation::MissingComponents);
    }

    for component in &components {
        let Some(dir) = component_dir(environment, component) else {
            return Err(GuardViolation::missing_component_dir(component));
        };
        if !dir.replace('\\', "/").contains(WORKTREE_PATH_SEGMENT) {
            return Err(GuardViolation::component_dir_not_worktree(component));
        }
    }
    Ok(())
}

/// Derives the component set the worktree rule checks.
fn declared_components(frontmatter: &TaskFrontmatter) -> Result<Vec<String>, GuardViolation> {
    match frontmatter.kind() {
        Some(TaskKind::Track) => Ok(frontmatter.components().to_vec()),
        Some(TaskKind::Component) => {
            let targets = frontmatter.component().map_or_else(
                || frontmatter.components().to_vec(),
                |single| vec![single.to_owned()],
            );
            if targets.len() == 1 {
                Ok(targets)
            } else {
                Err(GuardViolation::ComponentTargetNotSingular)
            }
        }
        _ => Err(GuardViolation::InvalidWorktreeKind),
    }
}

/// Enforces the parent → track → component hierarchy.
///
/// Parent tasks are rejected outright: they are never claimed or finished
/// directly. Track and component tasks must carry a `parent` relationship
/// whose target resolves, and the parent's kind (and, for components, its
/// stack) must agree with this task. An unreadable parent document degrades
/// to empty front-matter, surfacing as the ordinary kind-mismatch violation.
///
/// # Errors
///
/// Returns a [`GuardViolation`] for any hierarchy violation, or a
/// [`GuardError::Repository`] when the parent lookup itself fails.
pub async fn require_parent_structure<R>(
    ctx: &GuardContext,
    frontmatter: &TaskFrontmatter,
    repository: &R,
) -> Result<(), GuardError>
where
    R: TaskRepository,
{
    let Some(kind) = frontmatter.kind() else {
        return Err(GuardViolation::InvalidStructureKind.into());
    };
    if kind == TaskKind::Parent {
        return Err(GuardViolation::parent_task_not_runnable(ctx.task_id_hint()).into());
    }

    let Some(parent_id) = frontmatter.parent_id() else {
        return Err(GuardViolation::MissingParentRelationship.into());
    };

    let root = ctx.resolved_project_root();
    let Some(parent) = repository.find(root.as_deref(), &parent_id).await? else {
        return Err(GuardViolation::parent_not_found(&parent_id).into());
    };
    let parent_frontmatter = loader::load_frontmatter(repository, root.as_deref(), parent.id())
        .await
        .unwrap_or_default();

    if kind == TaskKind::Track {
        require_track_structure(frontmatter, &parent_id, &parent_frontmatter)?;
    } else {
        require_component_structure(frontmatter, &parent_id, &parent_frontmatter)?;
    }
    Ok(())
}

/// Track tasks sit under a parent task and name their track and components.
fn require_track_structure(
    frontmatter: &TaskFrontmatter,
    parent_id: &TaskId,
    parent_frontmatter: &TaskFrontmatter,
) -> Result<(), GuardViolation> {
    if parent_frontmatter.kind() != Some(TaskKind::Parent) {
        return Err(GuardViolation::track_not_under_parent(
            parent_id,
            parent_frontmatter.raw_kind(),
        ));
    }
    if frontmatter.track().is_none() {
        return Err(GuardViolation::MissingTrackName);
    }
    if frontmatter.components().is_empty() {
        return Err(GuardViolation::MissingTrackComponents);
    }
    Ok(())
}

/// Component tasks sit under a track and share its stack.
fn require_component_structure(
    frontmatter: &TaskFrontmatter,
    parent_id: &TaskId,
    parent_frontmatter: &TaskFrontmatter,
) -> Result<(), GuardViolation> {
    if parent_frontmatter.kind() != Some(TaskKind::Track) {
        return Err(GuardViolation::component_not_under_track(
            parent_id,
            parent_frontmatter.raw_kind(),
        ));
    }
    if let (Some(track_stack), Some(task_stack)) =
        (parent_frontmatter.stack(), frontmatter.stack())
        && track_stack != task_stack
    {
        return Err(GuardViolation::track_stack_mismatch(
            track_stack,
            task_stack,
        ));
    }
    Ok(())
}
