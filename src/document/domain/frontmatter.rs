//! The parsed front-matter view of a task document.
//!
//! Front-matter fields arrive loosely typed: scalars may be strings or
//! numbers, `components` may be a list or a comma-joined string, and
//! `relationships` is a sequence of `{type, target}` records mixed with
//! arbitrary other entries. The mapping is normalised exactly once at parse
//! time into [`TaskFrontmatter`], and every consumer goes through its named
//! accessors.

use super::{Relationship, TaskId, TaskKind};
use serde::Deserialize;
use serde::de::{Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use std::fmt;

/// Normalised front-matter of a single task document.
///
/// All values are trimmed; blank values are treated as absent. The `hs_kind`
/// value is additionally lower-cased, preserving the raw (normalised) form
/// for diagnostics alongside the parsed [`TaskKind`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFrontmatter {
    raw_kind: Option<String>,
    stack: Option<String>,
    base_task: Option<String>,
    base_worktree: Option<String>,
    track: Option<String>,
    component: Option<String>,
    components: Vec<String>,
    relationships: Vec<Relationship>,
}

impl TaskFrontmatter {
    /// Creates an empty front-matter view.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the task kind to its canonical storage form.
    #[must_use]
    pub fn with_kind(self, kind: TaskKind) -> Self {
        self.with_raw_kind(kind.as_str())
    }

    /// Sets the raw `hs_kind` value as it appears in a document.
    #[must_use]
    pub fn with_raw_kind(mut self, raw: impl Into<String>) -> Self {
        self.raw_kind = normalize_lower(raw.into());
        self
    }

    /// Sets the declared stack name.
    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = normalize(stack.into());
        self
    }

    /// Sets the base task reference.
    #[must_use]
    pub fn with_base_task(mut self, base_task: impl Into<String>) -> Self {
        self.base_task = normalize(base_task.into());
        self
    }

    /// Sets the base worktree reference.
    #[must_use]
    pub fn with_base_worktree(mut self, base_worktree: impl Into<String>) -> Self {
        self.base_worktree = normalize(base_worktree.into());
        self
    }

    /// Sets the track name.
    #[must_use]
    pub fn with_track(mut self, track: impl Into<String>) -> Self {
        self.track = normalize(track.into());
        self
    }

    /// Sets the singular component target.
    #[must_use]
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = normalize(component.into());
        self
    }

    /// Sets the declared component list.
    #[must_use]
    pub fn with_components(mut self, components: impl IntoIterator<Item = String>) -> Self {
        self.components = components.into_iter().filter_map(normalize).collect();
        self
    }

    /// Appends a relationship record.
    #[must_use]
    pub fn with_relationship(mut self, relationship: Relationship) -> Self {
        self.relationships.push(relationship);
        self
    }

    /// Returns the normalised raw `hs_kind` value, when present.
    #[must_use]
    pub fn raw_kind(&self) -> Option<&str> {
        self.raw_kind.as_deref()
    }

    /// Returns the parsed task kind, when present and valid.
    #[must_use]
    pub fn kind(&self) -> Option<TaskKind> {
        self.raw_kind
            .as_deref()
            .and_then(|raw| TaskKind::try_from(raw).ok())
    }

    /// Returns the declared stack name.
    #[must_use]
    pub fn stack(&self) -> Option<&str> {
        self.stack.as_deref()
    }

    /// Returns the base task reference.
    #[must_use]
    pub fn base_task(&self) -> Option<&str> {
        self.base_task.as_deref()
    }

    /// Returns the base worktree reference.
    #[must_use]
    pub fn base_worktree(&self) -> Option<&str> {
        self.base_worktree.as_deref()
    }

    /// Returns the track name.
    #[must_use]
    pub fn track(&self) -> Option<&str> {
        self.track.as_deref()
    }

    /// Returns the singular component target.
    #[must_use]
    pub fn component(&self) -> Option<&str> {
        self.component.as_deref()
    }

    /// Returns the declared component list.
    #[must_use]
    pub fn components(&self) -> &[String] {
        &self.components
    }

    /// Returns all relationship records.
    #[must_use]
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Returns the parent task id from the first `parent`-typed
    /// relationship, when that relationship carries a non-empty target.
    #[must_use]
    pub fn parent_id(&self) -> Option<TaskId> {
        self.relationships
            .iter()
            .find(|relationship| relationship.is_parent())
            .and_then(|relationship| TaskId::new(relationship.target()).ok())
    }
}

impl<'de> Deserialize<'de> for TaskFrontmatter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawFrontmatter::deserialize(deserializer)?;
        Ok(Self::from(raw))
    }
}

impl From<RawFrontmatter> for TaskFrontmatter {
    fn from(raw: RawFrontmatter) -> Self {
        Self {
            raw_kind: raw.hs_kind.0.and_then(normalize_lower),
            stack: raw.stack.0.and_then(normalize),
            base_task: raw.base_task.0.and_then(normalize),
            base_worktree: raw.base_worktree.0.and_then(normalize),
            track: raw.track.0.and_then(normalize),
            component: raw.component.0.and_then(normalize),
            components: raw.components.0,
            relationships: raw.relationships.0,
        }
    }
}

fn normalize(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

fn normalize_lower(value: String) -> Option<String> {
    normalize(value).map(|trimmed| trimmed.to_ascii_lowercase())
}

/// Wire-shaped front-matter with loosely typed fields.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawFrontmatter {
    hs_kind: LooseString,
    stack: LooseString,
    base_task: LooseString,
    base_worktree: LooseString,
    track: LooseString,
    component: StrictString,
    components: LooseList,
    relationships: LooseRelationships,
}

/// A scalar coerced to its string form; non-scalar values are absent.
#[derive(Debug, Default)]
struct LooseString(Option<String>);

impl<'de> Deserialize<'de> for LooseString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(LooseStringVisitor)
    }
}

struct LooseStringVisitor;

impl<'de> Visitor<'de> for LooseStringVisitor {
    type Value = LooseString;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a scalar front-matter value")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
        Ok(LooseString(Some(value.to_owned())))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
        Ok(LooseString(Some(value.to_string())))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
        Ok(LooseString(Some(value.to_string())))
    }

    fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
        Ok(LooseString(Some(value.to_string())))
    }

    fn visit_bool<E>(self, _value: bool) -> Result<Self::Value, E> {
        Ok(LooseString(None))
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E> {
        Ok(LooseString(None))
    }

    fn visit_none<E>(self) -> Result<Self::Value, E> {
        Ok(LooseString(None))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(LooseString(None))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(LooseString(None))
    }
}

/// A string-only scalar; any other value shape is absent.
#[derive(Debug, Default)]
struct StrictString(Option<String>);

impl<'de> Deserialize<'de> for StrictString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(StrictStringVisitor)
    }
}

struct StrictStringVisitor;

impl<'de> Visitor<'de> for StrictStringVisitor {
    type Value = StrictString;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a string front-matter value")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
        Ok(StrictString(Some(value.to_owned())))
    }

    fn visit_i64<E>(self, _value: i64) -> Result<Self::Value, E> {
        Ok(StrictString(None))
    }

    fn visit_u64<E>(self, _value: u64) -> Result<Self::Value, E> {
        Ok(StrictString(None))
    }

    fn visit_f64<E>(self, _value: f64) -> Result<Self::Value, E> {
        Ok(StrictString(None))
    }

    fn visit_bool<E>(self, _value: bool) -> Result<Self::Value, E> {
        Ok(StrictString(None))
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E> {
        Ok(StrictString(None))
    }

    fn visit_none<E>(self) -> Result<Self::Value, E> {
        Ok(StrictString(None))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(StrictString(None))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(StrictString(None))
    }
}

/// A component list: a YAML sequence of scalars, or a comma-joined string.
#[derive(Debug, Default)]
struct LooseList(Vec<String>);

impl<'de> Deserialize<'de> for LooseList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(LooseListVisitor)
    }
}

struct LooseListVisitor;

impl<'de> Visitor<'de> for LooseListVisitor {
    type Value = LooseList;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a sequence or comma-joined string")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
        let items = value
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_owned)
            .collect();
        Ok(LooseList(items))
    }

    fn visit_i64<E>(self, _value: i64) -> Result<Self::Value, E> {
        Ok(LooseList(Vec::new()))
    }

    fn visit_u64<E>(self, _value: u64) -> Result<Self::Value, E> {
        Ok(LooseList(Vec::new()))
    }

    fn visit_f64<E>(self, _value: f64) -> Result<Self::Value, E> {
        Ok(LooseList(Vec::new()))
    }

    fn visit_bool<E>(self, _value: bool) -> Result<Self::Value, E> {
        Ok(LooseList(Vec::new()))
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E> {
        Ok(LooseList(Vec::new()))
    }

    fn visit_none<E>(self) -> Result<Self::Value, E> {
        Ok(LooseList(Vec::new()))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::new();
        while let Some(item) = seq.next_element::<LooseString>()? {
            if let Some(value) = item.0.and_then(normalize) {
                items.push(value);
            }
        }
        Ok(LooseList(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(LooseList(Vec::new()))
    }
}

/// Relationship entries; non-mapping entries in the sequence are skipped.
#[derive(Debug, Default)]
struct LooseRelationships(Vec<Relationship>);

impl<'de> Deserialize<'de> for LooseRelationships {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(LooseRelationshipsVisitor)
    }
}

struct LooseRelationshipsVisitor;

impl<'de> Visitor<'de> for LooseRelationshipsVisitor {
    type Value = LooseRelationships;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a sequence of relationship records")
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E> {
        Ok(LooseRelationships(Vec::new()))
    }

    fn visit_none<E>(self) -> Result<Self::Value, E> {
        Ok(LooseRelationships(Vec::new()))
    }

    fn visit_str<E>(self, _value: &str) -> Result<Self::Value, E> {
        Ok(LooseRelationships(Vec::new()))
    }

    fn visit_bool<E>(self, _value: bool) -> Result<Self::Value, E> {
        Ok(LooseRelationships(Vec::new()))
    }

    fn visit_i64<E>(self, _value: i64) -> Result<Self::Value, E> {
        Ok(LooseRelationships(Vec::new()))
    }

    fn visit_u64<E>(self, _value: u64) -> Result<Self::Value, E> {
        Ok(LooseRelationships(Vec::new()))
    }

    fn visit_f64<E>(self, _value: f64) -> Result<Self::Value, E> {
        Ok(LooseRelationships(Vec::new()))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(LooseRelationships(Vec::new()))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut relationships = Vec::new();
        while let Some(entry) = seq.next_element::<LooseRelationship>()? {
            if let Some(relationship) = entry.0 {
                relationships.push(relationship);
            }
        }
        Ok(LooseRelationships(relationships))
    }
}

/// One relationship entry; anything that is not a mapping is absent.
#[derive(Debug, Default)]
struct LooseRelationship(Option<Relationship>);

impl<'de> Deserialize<'de> for LooseRelationship {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(LooseRelationshipVisitor)
    }
}

struct LooseRelationshipVisitor;

impl<'de> Visitor<'de> for LooseRelationshipVisitor {
    type Value = LooseRelationship;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a relationship mapping")
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E> {
        Ok(LooseRelationship(None))
    }

    fn visit_none<E>(self) -> Result<Self::Value, E> {
        Ok(LooseRelationship(None))
    }

    fn visit_str<E>(self, _value: &str) -> Result<Self::Value, E> {
        Ok(LooseRelationship(None))
    }

    fn visit_bool<E>(self, _value: bool) -> Result<Self::Value, E> {
        Ok(LooseRelationship(None))
    }

    fn visit_i64<E>(self, _value: i64) -> Result<Self::Value, E> {
        Ok(LooseRelationship(None))
    }

    fn visit_u64<E>(self, _value: u64) -> Result<Self::Value, E> {
        Ok(LooseRelationship(None))
    }

    fn visit_f64<E>(self, _value: f64) -> Result<Self::Value, E> {
        Ok(LooseRelationship(None))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(LooseRelationship(None))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut kind = None;
        let mut target = None;
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "type" => kind = map.next_value::<LooseString>()?.0,
                "target" => target = map.next_value::<LooseString>()?.0,
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(LooseRelationship(Some(Relationship::new(
            kind.unwrap_or_default(),
            target.unwrap_or_default(),
        ))))
    }
}
