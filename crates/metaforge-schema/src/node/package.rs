use crate::node::{EntityDef, MAIN_STORE};

///
/// EntityClassInfo
///
/// One discovered entity: its static def plus the backing store tag the
/// discovery source assigned to it.
///

#[derive(Clone, Copy, Debug)]
pub struct EntityClassInfo {
    pub def: &'static EntityDef,
    pub store: &'static str,
}

impl EntityClassInfo {
    #[must_use]
    pub const fn main(def: &'static EntityDef) -> Self {
        Self {
            def,
            store: MAIN_STORE,
        }
    }

    #[must_use]
    pub const fn in_store(def: &'static EntityDef, store: &'static str) -> Self {
        Self { def, store }
    }
}

///
/// EntityPackage
///
/// Discovery output for one logical package: the model name and the entity
/// classes it contributes. Consumed as-is by the model loader.
///

#[derive(Clone, Debug)]
pub struct EntityPackage {
    pub name: String,
    pub entities: Vec<EntityClassInfo>,
}

impl EntityPackage {
    #[must_use]
    pub fn new(name: impl Into<String>, entities: Vec<EntityClassInfo>) -> Self {
        Self {
            name: name.into(),
            entities,
        }
    }
}
