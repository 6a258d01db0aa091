//! Happy Stacks: stack-isolation policy guards for task lifecycle
//! transitions.
//!
//! Happy Stacks layers multi-component, multi-track workflow constraints on
//! top of a generic task tracker. Tasks declare a hierarchy (parent → track →
//! component), a named execution stack, and worktree-isolated component
//! directories in their document front-matter; this crate decides whether a
//! task may transition to "started" or "finished" by checking that metadata
//! against the active environment and the task's parent document, failing
//! closed with a remediation message on any violation.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure types with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external collaborators
//! - **Adapters**: Concrete implementations of ports (filesystem, process
//!   environment, in-memory doubles)
//!
//! # Modules
//!
//! - [`document`]: Task documents, front-matter parsing, and the task
//!   repository
//! - [`policy`]: The guard call context, rule checkers, and the start/finish
//!   guard services

pub mod document;
pub mod policy;
