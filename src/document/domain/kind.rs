//! The `hs_kind` task classification.

use super::ParseTaskKindError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a task in the Happy Stacks hierarchy.
///
/// Parents are planning umbrellas, tracks group component work toward a
/// shared stack, and components carry the actual implementation work in an
/// isolated worktree. The kind drives which other front-matter fields are
/// required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// Planning umbrella spanning one or more tracks.
    Parent,
    /// Integration-level task grouping component tasks.
    Track,
    /// Implementation task targeting a single component worktree.
    Component,
}

impl TaskKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Parent => "parent",
            Self::Track => "track",
            Self::Component => "component",
        }
    }
}

impl TryFrom<&str> for TaskKind {
    type Error = ParseTaskKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "parent" => Ok(Self::Parent),
            "track" => Ok(Self::Track),
            "component" => Ok(Self::Component),
            _ => Err(ParseTaskKindError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
