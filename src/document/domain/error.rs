//! Error types for document domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing document domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDocumentError {
    /// The task identifier is empty after trimming.
    #[error("task identifier must not be empty")]
    EmptyTaskId,
}

/// Error returned while parsing an `hs_kind` value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task kind: {0}")]
pub struct ParseTaskKindError(pub String);

/// Error returned when a front-matter block contains malformed YAML.
#[derive(Debug, Error)]
#[error("invalid YAML frontmatter: {0}")]
pub struct ParseDocumentError(#[from] serde_yaml_bw::Error);
