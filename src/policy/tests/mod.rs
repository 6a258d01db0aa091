//! Unit tests for the guard policy layer.
//!
//! Tests are organized into modules by rule:
//! - `context_tests`: call-context resolution
//! - `stack_rules_tests`: stack context agreement
//! - `metadata_rules_tests`: base scaffolding metadata
//! - `worktree_rules_tests`: component directory overrides
//! - `structure_rules_tests`: parent → track → component hierarchy
//! - `guard_tests`: start/finish composition
