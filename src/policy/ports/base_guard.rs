//! Port for the tracker's builtin lifecycle predicates.
//!
//! Happy Stacks wraps the generic start/finish checks the tracker already
//! performs. The outcome of that external call is an explicit result rather
//! than an intercepted exception: the guard service maps both `Ok(false)`
//! and `Err(_)` to a silent fail-closed `false`.

use crate::policy::domain::GuardContext;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for base guard delegation.
pub type BaseGuardResult<T> = Result<T, BaseGuardError>;

/// The builtin start/finish predicates the policy delegates to first.
#[async_trait]
pub trait BaseTaskGuard: Send + Sync {
    /// Asks the builtin predicate whether the task may start.
    ///
    /// # Errors
    ///
    /// Returns [`BaseGuardError`] when the predicate cannot be resolved or
    /// evaluated; callers treat this as a denial.
    async fn can_start(&self, ctx: &GuardContext) -> BaseGuardResult<bool>;

    /// Asks the builtin predicate whether the task may finish.
    ///
    /// # Errors
    ///
    /// Returns [`BaseGuardError`] when the predicate cannot be resolved or
    /// evaluated; callers treat this as a denial.
    async fn can_finish(&self, ctx: &GuardContext) -> BaseGuardResult<bool>;
}

/// Errors surfaced while delegating to the builtin predicates.
#[derive(Debug, Clone, Error)]
pub enum BaseGuardError {
    /// The predicate could not be resolved or evaluated.
    #[error("base guard unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl BaseGuardError {
    /// Wraps a delegation failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
