//! In-memory test doubles for the policy ports.

use crate::policy::domain::GuardContext;
use crate::policy::ports::{BaseGuardError, BaseGuardResult, BaseTaskGuard, Environment};
use async_trait::async_trait;
use std::collections::HashMap;
use std::io;

/// [`Environment`] backed by a fixed key/value map.
#[derive(Debug, Clone, Default)]
pub struct MapEnvironment {
    vars: HashMap<String, String>,
}

impl MapEnvironment {
    /// Creates an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a variable.
    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl Environment for MapEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// [`BaseTaskGuard`] returning fixed decisions.
#[derive(Debug, Clone)]
pub struct StubBaseGuard {
    start: BaseGuardResult<bool>,
    finish: BaseGuardResult<bool>,
}

impl StubBaseGuard {
    /// A base guard that admits every transition.
    #[must_use]
    pub const fn allow_all() -> Self {
        Self {
            start: Ok(true),
            finish: Ok(true),
        }
    }

    /// A base guard that denies every transition.
    #[must_use]
    pub const fn deny_all() -> Self {
        Self {
            start: Ok(false),
            finish: Ok(false),
        }
    }

    /// A base guard whose predicates fail to evaluate.
    #[must_use]
    pub fn unavailable() -> Self {
        let error = BaseGuardError::unavailable(io::Error::other("builtin guard unavailable"));
        Self {
            start: Err(error.clone()),
            finish: Err(error),
        }
    }

    /// Overrides the start decision.
    #[must_use]
    pub fn with_start(mut self, decision: BaseGuardResult<bool>) -> Self {
        self.start = decision;
        self
    }

    /// Overrides the finish decision.
    #[must_use]
    pub fn with_finish(mut self, decision: BaseGuardResult<bool>) -> Self {
        self.finish = decision;
        self
    }
}

#[async_trait]
impl BaseTaskGuard for StubBaseGuard {
    async fn can_start(&self, _ctx: &GuardContext) -> BaseGuardResult<bool> {
        self.start.clone()
    }

    async fn can_finish(&self, _ctx: &GuardContext) -> BaseGuardResult<bool> {
        self.finish.clone()
    }
}
