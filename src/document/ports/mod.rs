//! Port contracts for task document access.
//!
//! Ports define infrastructure-agnostic interfaces used by the policy layer.

pub mod repository;

pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
