//! Relationship records linking task documents.

use serde::{Deserialize, Serialize};

/// Canonical relationship type marking a task's parent link.
pub const PARENT_RELATIONSHIP: &str = "parent";

/// A typed link from one task document to another.
///
/// Front-matter carries these under the `relationships:` key; the policy
/// layer only interprets `parent`-typed links, but other types are preserved
/// as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(rename = "type")]
    kind: String,
    target: String,
}

impl Relationship {
    /// Creates a relationship record, trimming both fields.
    #[must_use]
    pub fn new(kind: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            kind: kind.into().trim().to_owned(),
            target: target.into().trim().to_owned(),
        }
    }

    /// Returns the relationship type.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns the link target identifier.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns `true` when this is a `parent`-typed link.
    #[must_use]
    pub fn is_parent(&self) -> bool {
        self.kind == PARENT_RELATIONSHIP
    }
}
