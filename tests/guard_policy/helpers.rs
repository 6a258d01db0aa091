//! Fixture helpers building a Happy Stacks document tree on disk.

use std::path::Path;
use std::sync::Arc;

use happy_stacks::document::adapters::FsTaskRepository;
use happy_stacks::policy::adapters::{StubBaseGuard, SystemEnvironment};
use happy_stacks::policy::services::LifecycleGuardService;

/// Guard service wired for the filesystem end-to-end scenarios.
pub type FsGuardService = LifecycleGuardService<FsTaskRepository, StubBaseGuard, SystemEnvironment>;

/// Writes a task document under `<root>/.edison/tasks/<id>.md`.
pub fn write_task_document(root: &Path, id: &str, content: &str) {
    let tasks_dir = root.join(".edison/tasks");
    std::fs::create_dir_all(&tasks_dir).expect("create tasks dir");
    std::fs::write(tasks_dir.join(format!("{id}.md")), content).expect("write task document");
}

/// A parent (planning umbrella) document.
pub fn parent_doc() -> String {
    "---\nhs_kind: parent\n---\nUmbrella planning task.\n".to_owned()
}

/// A track document parented under `parent_id`.
pub fn track_doc(parent_id: &str, stack: &str, track: &str, components: &[&str]) -> String {
    format!(
        "---\n\
         hs_kind: track\n\
         stack: {stack}\n\
         track: {track}\n\
         components: [{}]\n\
         base_task: T\n\
         relationships:\n\
         \x20 - type: parent\n\
         \x20   target: {parent_id}\n\
         ---\n",
        components.join(", ")
    )
}

/// A component document parented under `track_id`.
pub fn component_doc(track_id: &str, stack: &str, component: &str) -> String {
    format!(
        "---\n\
         hs_kind: component\n\
         stack: {stack}\n\
         base_task: T\n\
         base_worktree: edison/T\n\
         component: {component}\n\
         relationships:\n\
         \x20 - type: parent\n\
         \x20   target: {track_id}\n\
         ---\n\
         Implement the {component} component.\n"
    )
}

/// Seeds the canonical parent → track → component tree under `root`.
///
/// The acting component task is `tsk-c`, targeting component `happy` on
/// stack `s1`.
pub fn seed_component_tree(root: &Path) {
    write_task_document(root, "par-1", &parent_doc());
    write_task_document(root, "trk-1", &track_doc("par-1", "s1", "upstream", &["happy"]));
    write_task_document(root, "tsk-c", &component_doc("trk-1", "s1", "happy"));
}

/// Builds a filesystem-backed guard service rooted at `root`.
pub fn fs_service(root: &Path, base: StubBaseGuard) -> FsGuardService {
    LifecycleGuardService::new(
        Arc::new(FsTaskRepository::with_root(root)),
        Arc::new(base),
        Arc::new(SystemEnvironment::new()),
    )
}

/// Asserts a guard decision resolved without a violation.
///
/// # Errors
///
/// Returns an error when the guard raised or decided differently.
pub fn ensure_decision(
    result: &Result<bool, happy_stacks::policy::services::GuardError>,
    expected: bool,
) -> Result<(), eyre::Report> {
    match result {
        Ok(decision) => {
            eyre::ensure!(
                *decision == expected,
                "expected decision {expected}, got {decision}"
            );
            Ok(())
        }
        Err(err) => Err(eyre::eyre!("guard raised unexpectedly: {err}")),
    }
}
