use crate::{node::FieldList, types::IdKind};
use std::{any::Any, fmt, iter};
use thiserror::Error as ThisError;

///
/// EntityDef
///
/// Static descriptor for one entity class. Defs are declared once per entity
/// and linked by reference: `parent` forms the single-inheritance chain,
/// `extends` designates the base class this entity replaces platform-wide.
///

pub struct EntityDef {
    /// Short type identifier (the Rust type name).
    pub ident: &'static str,
    /// Stable metadata name used in session lookups, e.g. `app_Customer`.
    pub name: &'static str,
    /// Fully-qualified type path (the native type handle).
    pub type_path: &'static str,
    pub parent: Option<&'static EntityDef>,
    pub extends: Option<&'static EntityDef>,
    pub id_kind: IdKind,
    pub fields: FieldList,
    pub markers: Markers,
    pub hooks: &'static [PostConstruct],
    pub ctor: fn() -> Box<dyn EntityInstance>,
}

impl EntityDef {
    /// Walk the inheritance chain, nearest parent first.
    pub fn ancestors(&self) -> impl Iterator<Item = &'static EntityDef> {
        iter::successors(self.parent, |def| def.parent)
    }

    /// Walk the declared extension chain: the designated base, then the base
    /// that one declares in turn, until no further declaration exists.
    pub fn extends_chain(&self) -> impl Iterator<Item = &'static EntityDef> {
        iter::successors(self.extends, |def| def.extends)
    }

    /// True when `self` is `other` or inherits from it.
    #[must_use]
    pub fn is_subtype_of(&self, other: &EntityDef) -> bool {
        self.type_path == other.type_path
            || self.ancestors().any(|a| a.type_path == other.type_path)
    }
}

impl fmt::Debug for EntityDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityDef")
            .field("name", &self.name)
            .field("type_path", &self.type_path)
            .finish_non_exhaustive()
    }
}

///
/// Markers
///
/// Declarative class-level markers copied onto the metadata graph during
/// enrichment. All but `system_level` fall back to the nearest declaring
/// ancestor when absent; `system_level` never propagates.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct Markers {
    pub name_pattern: Option<&'static str>,
    pub enable_restore: Option<bool>,
    pub track_edit_history: Option<bool>,
    pub system_level: Option<bool>,
}

impl Markers {
    pub const NONE: Self = Self {
        name_pattern: None,
        enable_restore: None,
        track_edit_history: None,
        system_level: None,
    };
}

///
/// PostConstruct
///
/// Named post-construction hook. Hooks are collected across the inheritance
/// chain and deduplicated by name, so a redeclaration in a subclass overrides
/// the ancestor's hook body.
///

#[derive(Clone, Copy)]
pub struct PostConstruct {
    pub name: &'static str,
    pub invoke: HookFn,
}

pub type HookFn = fn(&mut dyn EntityInstance) -> Result<(), HookError>;

///
/// HookError
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct HookError {
    pub message: String,
}

impl HookError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

///
/// IdValue
///
/// Generated identifier payload for numeric-identity entities.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IdValue {
    Int(i32),
    Long(i64),
}

impl IdValue {
    #[must_use]
    pub const fn as_long(self) -> Option<i64> {
        match self {
            Self::Long(v) => Some(v),
            Self::Int(_) => None,
        }
    }

    #[must_use]
    pub const fn as_int(self) -> Option<i32> {
        match self {
            Self::Int(v) => Some(v),
            Self::Long(_) => None,
        }
    }
}

///
/// EntityIdentity
///
/// Compile-time link from an entity type to its static def, for typed entry
/// points that need the descriptor without an instance in hand.
///

pub trait EntityIdentity {
    const DEF: &'static EntityDef;
}

///
/// EntityInstance
///
/// Object-safe contract every constructible entity implements. The factory
/// only needs the def handle, generated-id plumbing, and downcasting.
///

pub trait EntityInstance: Any {
    fn def(&self) -> &'static EntityDef;

    /// Current generated identifier, if one has been assigned.
    fn generated_id(&self) -> Option<IdValue>;

    fn assign_generated_id(&mut self, id: IdValue);

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

#[cfg(test)]
mod tests {
    use super::*;

    static GRANDPARENT: EntityDef = EntityDef {
        ident: "Root",
        name: "test_Root",
        type_path: "test::Root",
        parent: None,
        extends: None,
        id_kind: IdKind::Long,
        fields: FieldList::EMPTY,
        markers: Markers::NONE,
        hooks: &[],
        ctor: || unreachable!("fixture def is never constructed"),
    };

    static PARENT: EntityDef = EntityDef {
        ident: "Mid",
        name: "test_Mid",
        type_path: "test::Mid",
        parent: Some(&GRANDPARENT),
        extends: None,
        id_kind: IdKind::Long,
        fields: FieldList::EMPTY,
        markers: Markers::NONE,
        hooks: &[],
        ctor: || unreachable!("fixture def is never constructed"),
    };

    static CHILD: EntityDef = EntityDef {
        ident: "Leaf",
        name: "test_Leaf",
        type_path: "test::Leaf",
        parent: Some(&PARENT),
        extends: None,
        id_kind: IdKind::Long,
        fields: FieldList::EMPTY,
        markers: Markers::NONE,
        hooks: &[],
        ctor: || unreachable!("fixture def is never constructed"),
    };

    #[test]
    fn ancestors_walk_nearest_first() {
        let names: Vec<_> = CHILD.ancestors().map(|d| d.name).collect();
        assert_eq!(names, vec!["test_Mid", "test_Root"]);
    }

    #[test]
    fn subtype_includes_self_and_ancestors() {
        assert!(CHILD.is_subtype_of(&CHILD));
        assert!(CHILD.is_subtype_of(&GRANDPARENT));
        assert!(!GRANDPARENT.is_subtype_of(&CHILD));
    }
}
