//! Finish-guard end-to-end tests.

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
async fn component_task_finishes_end_to_end() {
    let temp = tempfile::tempdir().expect("tempdir");
    seed_component_tree(temp.path());
    let _env = EnvVarGuard::set_many(STACK_ENV);

    let service = fs_service(temp.path(), StubBaseGuard::allow_all());
    let ctx = GuardContext::new().with_task_id("tsk-c");

    let result = service.can_finish(&ctx).await;
    ensure_decision(&result, true).expect("finish should be admitted");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn base_finish_denial_short_circuits_silently() {
    let temp = tempfile::tempdir().expect("tempdir");
    seed_component_tree(temp.path());
    let _env = EnvVarGuard::set_many(STACK_ENV);

    let service = fs_service(
        temp.path(),
        StubBaseGuard::allow_all().with_finish(Ok(false)),
    );
    let ctx = GuardContext::new().with_task_id("tsk-c");

    let result = service.can_finish(&ctx).await;
    ensure_decision(&result, false).expect("finish should be silently denied");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn parent_task_is_never_finishable() {
    let temp = tempfile::tempdir().expect("tempdir");
    seed_component_tree(temp.path());
    let _env = EnvVarGuard::set_many(STACK_ENV);

    let service = fs_service(temp.path(), StubBaseGuard::allow_all());
    let ctx = GuardContext::new().with_task_id("par-1");

    let result = service.can_finish(&ctx).await;
    assert!(matches!(
        result,
        Err(GuardError::Violation(
            GuardViolation::ParentTaskNotRunnable { .. }
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn finish_still_requires_the_stack_context() {
    let temp = tempfile::tempdir().expect("tempdir");
    seed_component_tree(temp.path());
    let _env = EnvVarGuard::set_many(&[
        ("HAPPY_STACKS_STACK", None),
        ("HAPPY_LOCAL_STACK", None),
        (
            "HAPPY_STACKS_COMPONENT_DIR_HAPPY",
            Some("/repo/components/.worktrees/happy"),
        ),
        ("HAPPY_LOCAL_COMPONENT_DIR_HAPPY", None),
    ]);

    let service = fs_service(temp.path(), StubBaseGuard::allow_all());
    let ctx = GuardContext::new().with_task_id("tsk-c");

    let result = service.can_finish(&ctx).await;
    assert!(matches!(
        result,
        Err(GuardError::Violation(GuardViolation::MissingStackContext { task_stack }))
            if task_stack == "s1"
    ));
}
