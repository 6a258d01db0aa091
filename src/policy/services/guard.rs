//! Start/finish guard composition.

use crate::document::ports::{TaskRepository, TaskRepositoryError};
use crate::policy::domain::{GuardContext, GuardViolation};
use crate::policy::ports::{BaseTaskGuard, Environment};
use crate::policy::services::{loader, rules};
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by guard evaluation.
#[derive(Debug, Clone, Error)]
pub enum GuardError {
    /// A Happy Stacks rule was violated.
    #[error(transparent)]
    Violation(#[from] GuardViolation),
    /// The parent lookup failed at the repository.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for guard evaluation.
pub type GuardResult<T> = Result<T, GuardError>;

/// Lifecycle guard enforcing the Happy Stacks policy.
///
/// Both entry points delegate to the builtin predicate first and return
/// `Ok(false)` without further checks when it denies or fails (fail-closed).
/// Once the builtin predicate admits the transition, the acting task's
/// front-matter is loaded and the rule set runs in order: stack context,
/// parent structure, base metadata, worktree component dirs. The first
/// violation aborts evaluation.
#[derive(Clone)]
pub struct LifecycleGuardService<R, B, E>
where
    R: TaskRepository,
    B: BaseTaskGuard,
    E: Environment,
{
    repository: Arc<R>,
    base: Arc<B>,
    environment: Arc<E>,
}

impl<R, B, E> LifecycleGuardService<R, B, E>
where
    R: TaskRepository,
    B: BaseTaskGuard,
    E: Environment,
{
    /// Creates a new lifecycle guard.
    #[must_use]
    pub const fn new(repository: Arc<R>, base: Arc<B>, environment: Arc<E>) -> Self {
        Self {
            repository,
            base,
            environment,
        }
    }

    /// Decides whether the task in `ctx` may transition to "started".
    ///
    /// # Errors
    ///
    /// Returns [`GuardError::Violation`] when a Happy Stacks rule fails,
    /// including when the acting task's front-matter cannot be read, or
    /// [`GuardError::Repository`] when the parent lookup fails.
    pub async fn can_start(&self, ctx: &GuardContext) -> GuardResult<bool> {
        if !matches!(self.base.can_start(ctx).await, Ok(true)) {
            return Ok(false);
        }
        self.enforce(ctx).await
    }

    /// Decides whether the task in `ctx` may transition to "finished".
    ///
    /// The rule set is identical to [`Self::can_start`]; the task must still
    /// be inside the correct stack context when it is marked done.
    ///
    /// # Errors
    ///
    /// As for [`Self::can_start`].
    pub async fn can_finish(&self, ctx: &GuardContext) -> GuardResult<bool> {
        if !matches!(self.base.can_finish(ctx).await, Ok(true)) {
            return Ok(false);
        }
        self.enforce(ctx).await
    }

    async fn enforce(&self, ctx: &GuardContext) -> GuardResult<bool> {
        let Some(frontmatter) =
            loader::load_task_frontmatter(self.repository.as_ref(), ctx).await
        else {
            return Err(GuardViolation::UnreadableFrontmatter.into());
        };

        rules::require_stack_context(self.environment.as_ref(), &frontmatter)?;
        rules::require_parent_structure(ctx, &frontmatter, self.repository.as_ref()).await?;
        rules::require_base_metadata(ctx, &frontmatter)?;
        rules::require_worktree_component_dirs(self.environment.as_ref(), &frontmatter)?;
        Ok(true)
    }
}
