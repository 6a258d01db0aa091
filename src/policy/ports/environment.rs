//! Environment port and the Happy Stacks variable-name contract.
//!
//! Every environment read in the policy layer goes through [`Environment`],
//! and every primary/legacy-alias fallback goes through
//! [`var_with_fallback`], so the alias chain lives in exactly one place.

/// Primary variable carrying the active stack name.
pub const STACK_VAR: &str = "HAPPY_STACKS_STACK";

/// Legacy alias of [`STACK_VAR`].
pub const LEGACY_STACK_VAR: &str = "HAPPY_LOCAL_STACK";

/// Prefix of the per-component directory override variables.
pub const COMPONENT_DIR_VAR_PREFIX: &str = "HAPPY_STACKS_COMPONENT_DIR_";

/// Legacy alias prefix of [`COMPONENT_DIR_VAR_PREFIX`].
pub const LEGACY_COMPONENT_DIR_VAR_PREFIX: &str = "HAPPY_LOCAL_COMPONENT_DIR_";

/// Read access to the environment the guards run in.
pub trait Environment: Send + Sync {
    /// Returns the raw value of `key`, when set.
    fn var(&self, key: &str) -> Option<String>;
}

/// Looks up `primary`, falling back to `legacy`; blank values are absent.
pub fn var_with_fallback(
    environment: &impl Environment,
    primary: &str,
    legacy: &str,
) -> Option<String> {
    non_blank(environment.var(primary)).or_else(|| non_blank(environment.var(legacy)))
}

/// Returns the active stack name from the environment.
pub fn active_stack(environment: &impl Environment) -> Option<String> {
    var_with_fallback(environment, STACK_VAR, LEGACY_STACK_VAR)
}

/// Returns the directory override for `component`, honouring the legacy
/// alias.
pub fn component_dir(environment: &impl Environment, component: &str) -> Option<String> {
    var_with_fallback(
        environment,
        &component_dir_var(component),
        &legacy_component_dir_var(component),
    )
}

/// Returns the primary override variable name for `component`.
///
/// The component name is upper-cased with hyphens mapped to underscores:
/// `my-comp` reads from `HAPPY_STACKS_COMPONENT_DIR_MY_COMP`.
#[must_use]
pub fn component_dir_var(component: &str) -> String {
    format!("{COMPONENT_DIR_VAR_PREFIX}{}", mangle(component))
}

/// Returns the legacy override variable name for `component`.
#[must_use]
pub fn legacy_component_dir_var(component: &str) -> String {
    format!("{LEGACY_COMPONENT_DIR_VAR_PREFIX}{}", mangle(component))
}

fn mangle(component: &str) -> String {
    component.to_uppercase().replace('-', "_")
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_owned())
        }
    })
}
