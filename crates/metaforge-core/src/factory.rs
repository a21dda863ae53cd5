use crate::{
    error::NotFoundError,
    model::{MetaClass, Session},
    tools,
};
use metaforge_schema::{
    node::{EntityDef, EntityIdentity, EntityInstance, HookError, IdValue, PostConstruct},
    types::IdKind,
};
use std::{
    collections::{BTreeMap, BTreeSet},
    iter,
    sync::{Arc, Mutex},
};
use thiserror::Error as ThisError;

///
/// CreationError
///

#[derive(Debug, ThisError)]
pub enum CreationError {
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    Identifier(#[from] IdSourceError),

    #[error("post-construct hook '{hook}' failed on '{class}': {source}")]
    Hook {
        class: String,
        hook: String,
        #[source]
        source: HookError,
    },
}

///
/// IdSourceError
///

#[derive(Debug, ThisError)]
#[error("identifier source failed for '{entity}': {message}")]
pub struct IdSourceError {
    pub entity: String,
    pub message: String,
}

///
/// NumberIdSource
///
/// Supplier of fresh numeric identifiers, scoped by entity metadata name.
///

pub trait NumberIdSource: Send + Sync {
    fn next_long(&self, entity: &str) -> Result<i64, IdSourceError>;

    fn next_integer(&self, entity: &str) -> Result<i32, IdSourceError>;
}

///
/// SequentialIdSource
///
/// In-memory id source handing out ascending values per entity name,
/// starting at 1.
///

#[derive(Debug, Default)]
pub struct SequentialIdSource {
    counters: Mutex<BTreeMap<String, i64>>,
}

impl SequentialIdSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn next(&self, entity: &str) -> i64 {
        let mut counters = self
            .counters
            .lock()
            .expect("id counters mutex poisoned while acquiring lock");
        let counter = counters.entry(entity.to_string()).or_insert(0);
        *counter += 1;
        *counter
    }
}

impl NumberIdSource for SequentialIdSource {
    fn next_long(&self, entity: &str) -> Result<i64, IdSourceError> {
        Ok(self.next(entity))
    }

    fn next_integer(&self, entity: &str) -> Result<i32, IdSourceError> {
        let value = self.next(entity);
        i32::try_from(value).map_err(|_| IdSourceError {
            entity: entity.to_string(),
            message: format!("integer id space exhausted at {value}"),
        })
    }
}

///
/// EntityFactory
///
/// Creates entity instances through the effective (extended) class, assigns
/// generated numeric identifiers for main-store entities, and runs
/// post-construction hooks up the inheritance chain.
///

pub struct EntityFactory {
    id_source: Arc<dyn NumberIdSource>,
}

impl EntityFactory {
    #[must_use]
    pub fn new(id_source: Arc<dyn NumberIdSource>) -> Self {
        Self { id_source }
    }

    /// Create an instance for a class name. A base whose effective class
    /// differs yields an instance of the effective class, never the base.
    pub fn create(
        &self,
        session: &Session,
        name: &str,
    ) -> Result<Box<dyn EntityInstance>, CreationError> {
        let class = session.class_nn(name)?;
        let effective_name = session.extensions().effective_class(class.name());
        let effective = session.class_nn(effective_name)?;

        let mut instance = (effective.def().ctor)();
        self.assign_identifier(effective, &mut *instance)?;
        invoke_post_construct(effective.def(), &mut *instance)?;

        Ok(instance)
    }

    /// Create an instance for a static def.
    pub fn create_by_def(
        &self,
        session: &Session,
        def: &'static EntityDef,
    ) -> Result<Box<dyn EntityInstance>, CreationError> {
        self.create(session, def.name)
    }

    /// Create an instance for a registered entity type.
    pub fn create_of<T: EntityIdentity>(
        &self,
        session: &Session,
    ) -> Result<Box<dyn EntityInstance>, CreationError> {
        self.create(session, T::DEF.name)
    }

    /// Create an instance for a descriptor already in hand.
    pub fn create_for_class(
        &self,
        session: &Session,
        class: &MetaClass,
    ) -> Result<Box<dyn EntityInstance>, CreationError> {
        self.create(session, class.name())
    }

    // Generated numeric kinds backed by the main store get a fresh id;
    // everything else is left unassigned.
    fn assign_identifier(
        &self,
        class: &MetaClass,
        instance: &mut dyn EntityInstance,
    ) -> Result<(), CreationError> {
        if !tools::is_main_store(class) {
            return Ok(());
        }

        let id = match class.def().id_kind {
            IdKind::Long => IdValue::Long(self.id_source.next_long(class.name())?),
            IdKind::Integer => IdValue::Int(self.id_source.next_integer(class.name())?),
            _ => return Ok(()),
        };

        instance.assign_generated_id(id);

        Ok(())
    }
}

// Collect hooks leaf-to-base, deduplicated by name so the nearest
// declaration wins, then invoke base-most first.
fn invoke_post_construct(
    def: &'static EntityDef,
    instance: &mut dyn EntityInstance,
) -> Result<(), CreationError> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut levels: Vec<Vec<&'static PostConstruct>> = Vec::new();

    for current in iter::once(def).chain(def.ancestors()) {
        let hooks: Vec<_> = current
            .hooks
            .iter()
            .filter(|hook| seen.insert(hook.name))
            .collect();
        levels.push(hooks);
    }

    for level in levels.iter().rev() {
        for hook in level {
            (hook.invoke)(instance).map_err(|source| CreationError::Hook {
                class: def.name.to_string(),
                hook: hook.name.to_string(),
                source,
            })?;
        }
    }

    Ok(())
}
