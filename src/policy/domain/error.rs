//! Violation vocabulary for the Happy Stacks guard policy.
//!
//! Every rule failure is a typed variant carrying its full remediation
//! message: a one-line diagnosis, optional `- key: value` context lines, and
//! a `Fix:` block of literal commands. Guards fail closed by raising these;
//! nothing in the policy layer repairs a violation silently.

use crate::document::domain::TaskId;
use thiserror::Error;

/// Display form for an absent parent kind in structure diagnostics.
const MISSING_KIND: &str = "<missing>";

/// A Happy Stacks policy violation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GuardViolation {
    /// The task declares no `stack` in its front-matter.
    #[error(
        "Happy Stacks: missing required task frontmatter key `stack`.\n\
         Fix: edit the task file and set:\n\
         \x20 stack: <stack>\n\
         Then run Edison via:\n\
         \x20 happys edison --stack=<stack> -- <edison ...>"
    )]
    MissingTaskStack,

    /// No active stack is set in the environment.
    #[error(
        "Happy Stacks: missing stack context (HAPPY_STACKS_STACK).\n\
         Fix: run Edison through the stack wrapper:\n\
         \x20 happys edison --stack={task_stack} -- <edison ...>"
    )]
    MissingStackContext {
        /// The stack the task declares.
        task_stack: String,
    },

    /// The environment stack disagrees with the task's declared stack.
    #[error(
        "Happy Stacks: stack mismatch.\n\
         - env stack: {env_stack}\n\
         - task stack: {task_stack}\n\
         Fix: re-run with:\n\
         \x20 happys edison --stack={task_stack} -- <edison ...>"
    )]
    StackMismatch {
        /// The stack active in the environment.
        env_stack: String,
        /// The stack the task declares.
        task_stack: String,
    },

    /// `hs_kind` is missing or not one of the enumerated values.
    #[error(
        "Happy Stacks: missing/invalid `hs_kind`.\n\
         Fix: set `hs_kind: parent|track|component` in task frontmatter."
    )]
    InvalidKind,

    /// A track/component task declares no `base_task`.
    #[error(
        "Happy Stacks: missing required task frontmatter key `base_task`.\n\
         Fix (recommended):\n\
         \x20 happys edison task:scaffold {task_id} --yes\n\
         Or set:\n\
         \x20 base_task: <parent-feature-task-id>"
    )]
    MissingBaseTask {
        /// The acting task id as far as the context resolves it.
        task_id: String,
    },

    /// A component task declares no `base_worktree`.
    #[error(
        "Happy Stacks: missing required task frontmatter key `base_worktree`.\n\
         Fix (recommended):\n\
         \x20 happys edison task:scaffold {task_id} --yes\n\
         Or set:\n\
         \x20 base_worktree: edison/<task-id>"
    )]
    MissingBaseWorktree {
        /// The acting task id as far as the context resolves it.
        task_id: String,
    },

    /// `hs_kind` does not name a worktree-scoped task (track/component).
    #[error(
        "Happy Stacks: missing/invalid `hs_kind`.\n\
         Fix:\n\
         \x20 - set `hs_kind: track` on the track/integration task\n\
         \x20 - set `hs_kind: component` on each component implementation task"
    )]
    InvalidWorktreeKind,

    /// A component task targets zero or several components.
    #[error(
        "Happy Stacks: component task must target exactly one component.\n\
         Fix: set `component: happy` (or `components: [happy]`)."
    )]
    ComponentTargetNotSingular,

    /// A worktree-scoped task declares no components at all.
    #[error(
        "Happy Stacks: task must declare component(s) in frontmatter.\n\
         Fix: set `components: [...]` (parent) or `component: ...` (component subtask)."
    )]
    MissingComponents,

    /// No component directory override is set for a declared component.
    #[error(
        "Happy Stacks: missing stack component dir override for {component}.\n\
         Fix (recommended):\n\
         \x20 happys edison task:scaffold <task-id> --yes\n\
         Or manually:\n\
         \x20 happys wt new {component} edison/<task-id>\n\
         \x20 happys stack wt <stack> -- use {component} /abs/path/to/worktree"
    )]
    MissingComponentDir {
        /// The component whose override is absent.
        component: String,
    },

    /// A component directory override points at a default checkout.
    #[error(
        "Happy Stacks: component dir for {component} is not a worktree path.\n\
         Refusing to operate on default checkouts under components/<component>.\n\
         Fix (recommended):\n\
         \x20 happys edison task:scaffold <task-id> --yes\n\
         Or:\n\
         \x20 happys stack wt <stack> -- use {component} <owner/branch|/abs/path>"
    )]
    ComponentDirNotWorktree {
        /// The component whose override is not worktree-isolated.
        component: String,
    },

    /// `hs_kind` is missing or invalid where hierarchy rules apply.
    #[error("Happy Stacks: missing/invalid `hs_kind` (expected parent|track|component).")]
    InvalidStructureKind,

    /// A parent task was asked to start or finish directly.
    #[error(
        "Happy Stacks: refusing to claim/finish a parent task.\n\
         Parent tasks are planning umbrellas and should spawn track + component subtasks.\n\
         Fix (recommended):\n\
         \x20 - Create a track task (hs_kind=track) as a child of this parent\n\
         \x20 - Create component tasks (hs_kind=component) as children of the track\n\
         \x20 - Or run:\n\
         \x20   happys edison task:scaffold {task_id} --yes"
    )]
    ParentTaskNotRunnable {
        /// The acting task id, or a placeholder when unresolvable.
        task_id: String,
    },

    /// The task carries no `parent`-typed relationship.
    #[error(
        "Happy Stacks: task must have a parent relationship (canonical `relationships:`).\n\
         Fix:\n\
         \x20 edison task link <parent_id> <child_id>\n\
         Or (recommended):\n\
         \x20 happys edison task:scaffold <parent-task-id> --yes"
    )]
    MissingParentRelationship,

    /// The linked parent task does not exist.
    #[error(
        "Happy Stacks: parent task not found: {parent_id}\n\
         Fix: ensure the parent task exists or re-link tasks."
    )]
    ParentNotFound {
        /// The unresolvable parent id.
        parent_id: String,
    },

    /// A track task is not linked under a parent-kind task.
    #[error(
        "Happy Stacks: track tasks must be children of a parent task.\n\
         - this task: hs_kind=track\n\
         - parent: {parent_id} hs_kind={parent_kind}\n\
         Fix: link the track under the umbrella parent task."
    )]
    TrackNotUnderParent {
        /// The linked parent id.
        parent_id: String,
        /// The parent's kind, or `<missing>` when undeclared.
        parent_kind: String,
    },

    /// A track task declares no `track` name.
    #[error(
        "Happy Stacks: track task must declare `track` (e.g. upstream|fork|integration).\n\
         Fix: set `track: upstream` in task frontmatter."
    )]
    MissingTrackName,

    /// A track task declares no `components`.
    #[error(
        "Happy Stacks: track task must declare `components`.\n\
         Fix: set `components: [happy, happy-cli, ...]` in task frontmatter."
    )]
    MissingTrackComponents,

    /// A component task is not linked under a track-kind task.
    #[error(
        "Happy Stacks: component tasks must be children of a track task.\n\
         - this task: hs_kind=component\n\
         - parent: {parent_id} hs_kind={parent_kind}\n\
         Fix: link this component task under the correct track task."
    )]
    ComponentNotUnderTrack {
        /// The linked parent id.
        parent_id: String,
        /// The parent's kind, or `<missing>` when undeclared.
        parent_kind: String,
    },

    /// A component task's stack disagrees with its track's stack.
    #[error(
        "Happy Stacks: component task stack must match its track stack.\n\
         - track stack: {track_stack}\n\
         - task stack: {task_stack}\n\
         Fix: set this task's `stack` to match the track task."
    )]
    TrackStackMismatch {
        /// The stack the track declares.
        track_stack: String,
        /// The stack the component task declares.
        task_stack: String,
    },

    /// The acting task's front-matter could not be loaded.
    #[error("Happy Stacks: cannot read task frontmatter (missing/invalid YAML frontmatter).")]
    UnreadableFrontmatter,
}

impl GuardViolation {
    /// Missing environment stack while the task declares `task_stack`.
    #[must_use]
    pub fn missing_stack_context(task_stack: impl Into<String>) -> Self {
        Self::MissingStackContext {
            task_stack: task_stack.into(),
        }
    }

    /// Environment/task stack disagreement.
    #[must_use]
    pub fn stack_mismatch(env_stack: impl Into<String>, task_stack: impl Into<String>) -> Self {
        Self::StackMismatch {
            env_stack: env_stack.into(),
            task_stack: task_stack.into(),
        }
    }

    /// Missing `base_task`, with the context's task id hint for the fix
    /// command (blank when unresolvable, as the tracker renders it).
    #[must_use]
    pub fn missing_base_task(task_id: Option<&str>) -> Self {
        Self::MissingBaseTask {
            task_id: task_id.unwrap_or_default().to_owned(),
        }
    }

    /// Missing `base_worktree`, with the context's task id hint.
    #[must_use]
    pub fn missing_base_worktree(task_id: Option<&str>) -> Self {
        Self::MissingBaseWorktree {
            task_id: task_id.unwrap_or_default().to_owned(),
        }
    }

    /// Missing component directory override for `component`.
    #[must_use]
    pub fn missing_component_dir(component: impl Into<String>) -> Self {
        Self::MissingComponentDir {
            component: component.into(),
        }
    }

    /// Component directory override outside the worktree area.
    #[must_use]
    pub fn component_dir_not_worktree(component: impl Into<String>) -> Self {
        Self::ComponentDirNotWorktree {
            component: component.into(),
        }
    }

    /// Direct start/finish of a parent task.
    #[must_use]
    pub fn parent_task_not_runnable(task_id: Option<&str>) -> Self {
        Self::ParentTaskNotRunnable {
            task_id: task_id.unwrap_or("<parent-task-id>").to_owned(),
        }
    }

    /// Unresolvable parent link.
    #[must_use]
    pub fn parent_not_found(parent_id: &TaskId) -> Self {
        Self::ParentNotFound {
            parent_id: parent_id.to_string(),
        }
    }

    /// Track task linked under a non-parent task.
    #[must_use]
    pub fn track_not_under_parent(parent_id: &TaskId, parent_kind: Option<&str>) -> Self {
        Self::TrackNotUnderParent {
            parent_id: parent_id.to_string(),
            parent_kind: display_kind(parent_kind),
        }
    }

    /// Component task linked under a non-track task.
    #[must_use]
    pub fn component_not_under_track(parent_id: &TaskId, parent_kind: Option<&str>) -> Self {
        Self::ComponentNotUnderTrack {
            parent_id: parent_id.to_string(),
            parent_kind: display_kind(parent_kind),
        }
    }

    /// Component stack diverging from its track's stack.
    #[must_use]
    pub fn track_stack_mismatch(
        track_stack: impl Into<String>,
        task_stack: impl Into<String>,
    ) -> Self {
        Self::TrackStackMismatch {
            track_stack: track_stack.into(),
            task_stack: task_stack.into(),
        }
    }
}

fn display_kind(kind: Option<&str>) -> String {
    match kind {
        Some(value) if !value.is_empty() => value.to_owned(),
        _ => MISSING_KIND.to_owned(),
    }
}
