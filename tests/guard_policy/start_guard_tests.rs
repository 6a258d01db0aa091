//! Start-guard end-to-end tests.

use std::path::Path;

use happy_stacks::policy::adapters::StubBaseGuard;
use happy_stacks::policy::domain::{GuardContext, GuardViolation};
use happy_stacks::policy::services::GuardError;
use rstest::rstest;

use super::helpers::{ensure_decision, fs_service, seed_component_tree};
use crate::test_helpers::EnvVarGuard;

const STACK_ENV: &[(&str, Option<&str>)] = &[
    ("HAPPY_STACKS_STACK", Some("s1")),
    ("HAPPY_LOCAL_STACK", None),
    (
        "HAPPY_STACKS_COMPONENT_DIR_HAPPY",
        Some("/repo/components/.worktrees/happy"),
    ),
    ("HAPPY_LOCAL_COMPONENT_DIR_HAPPY", None),
];

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn component_task_starts_end_to_end() {
    let temp = tempfile::tempdir().expect("tempdir");
    seed_component_tree(temp.path());
    let _env = EnvVarGuard::set_many(STACK_ENV);

    let service = fs_service(temp.path(), StubBaseGuard::allow_all());
    let ctx = GuardContext::new().with_task_id("tsk-c");

    let result = service.can_start(&ctx).await;
    ensure_decision(&result, true).expect("start should be admitted");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn project_root_override_reaches_the_repository() {
    let temp = tempfile::tempdir().expect("tempdir");
    seed_component_tree(temp.path());
    let _env = EnvVarGuard::set_many(STACK_ENV);

    // No default root: the context override is the only way to the documents.
    let service = fs_service(Path::new("."), StubBaseGuard::allow_all());
    let ctx = GuardContext::new()
        .with_task_id("tsk-c")
        .with_project_root(temp.path());

    let result = service.can_start(&ctx).await;
    ensure_decision(&result, true).expect("start should be admitted");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn wrong_environment_stack_is_rejected() {
    let temp = tempfile::tempdir().expect("tempdir");
    seed_component_tree(temp.path());
    let _env = EnvVarGuard::set_many(&[
        ("HAPPY_STACKS_STACK", Some("s2")),
        ("HAPPY_LOCAL_STACK", None),
        (
            "HAPPY_STACKS_COMPONENT_DIR_HAPPY",
            Some("/repo/components/.worktrees/happy"),
        ),
        ("HAPPY_LOCAL_COMPONENT_DIR_HAPPY", None),
    ]);

    let service = fs_service(temp.path(), StubBaseGuard::allow_all());
    let ctx = GuardContext::new().with_task_id("tsk-c");

    let result = service.can_start(&ctx).await;
    assert!(matches!(
        result,
        Err(GuardError::Violation(GuardViolation::StackMismatch { env_stack, task_stack }))
            if env_stack == "s2" && task_stack == "s1"
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_component_override_names_the_component() {
    let temp = tempfile::tempdir().expect("tempdir");
    seed_component_tree(temp.path());
    let _env = EnvVarGuard::set_many(&[
        ("HAPPY_STACKS_STACK", Some("s1")),
        ("HAPPY_LOCAL_STACK", None),
        ("HAPPY_STACKS_COMPONENT_DIR_HAPPY", None),
        ("HAPPY_LOCAL_COMPONENT_DIR_HAPPY", None),
    ]);

    let service = fs_service(temp.path(), StubBaseGuard::allow_all());
    let ctx = GuardContext::new().with_task_id("tsk-c");

    let result = service.can_start(&ctx).await;
    assert!(matches!(
        result,
        Err(GuardError::Violation(GuardViolation::MissingComponentDir { component }))
            if component == "happy"
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn default_checkout_override_is_refused() {
    let temp = tempfile::tempdir().expect("tempdir");
    seed_component_tree(temp.path());
    let _env = EnvVarGuard::set_many(&[
        ("HAPPY_STACKS_STACK", Some("s1")),
        ("HAPPY_LOCAL_STACK", None),
        (
            "HAPPY_STACKS_COMPONENT_DIR_HAPPY",
            Some("/repo/components/happy"),
        ),
        ("HAPPY_LOCAL_COMPONENT_DIR_HAPPY", None),
    ]);

    let service = fs_service(temp.path(), StubBaseGuard::allow_all());
    let ctx = GuardContext::new().with_task_id("tsk-c");

    let result = service.can_start(&ctx).await;
    assert!(matches!(
        result,
        Err(GuardError::Violation(GuardViolation::ComponentDirNotWorktree { component }))
            if component == "happy"
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn track_task_starts_when_every_component_is_isolated() {
    let temp = tempfile::tempdir().expect("tempdir");
    super::helpers::write_task_document(temp.path(), "par-1", &super::helpers::parent_doc());
    super::helpers::write_task_document(
        temp.path(),
        "trk-1",
        &super::helpers::track_doc("par-1", "s1", "upstream", &["happy", "happy-cli"]),
    );
    let _env = EnvVarGuard::set_many(&[
        ("HAPPY_STACKS_STACK", Some("s1")),
        ("HAPPY_LOCAL_STACK", None),
        (
            "HAPPY_STACKS_COMPONENT_DIR_HAPPY",
            Some("/repo/components/.worktrees/happy"),
        ),
        ("HAPPY_LOCAL_COMPONENT_DIR_HAPPY", None),
        (
            "HAPPY_STACKS_COMPONENT_DIR_HAPPY_CLI",
            Some("/repo/components/.worktrees/happy-cli"),
        ),
        ("HAPPY_LOCAL_COMPONENT_DIR_HAPPY_CLI", None),
    ]);

    let service = fs_service(temp.path(), StubBaseGuard::allow_all());
    let ctx = GuardContext::new().with_task_id("trk-1");

    let result = service.can_start(&ctx).await;
    ensure_decision(&result, true).expect("start should be admitted");
}
