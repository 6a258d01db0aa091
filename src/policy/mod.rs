//! Guard policy for Happy Stacks task lifecycle transitions.
//!
//! This module decides whether a task may be started or finished. Both
//! decisions delegate to the tracker's builtin predicate first (fail-closed),
//! then enforce the Happy Stacks rule set over the task's front-matter, the
//! active environment, and the parent document. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Guard services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
