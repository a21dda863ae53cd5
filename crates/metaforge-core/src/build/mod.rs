//! The one-shot metadata build pipeline and its lazily-initialized owner.

mod enrich;
mod loader;
mod rewrite;

pub use enrich::infer_annotation_value;

#[cfg(test)]
pub(crate) use loader::load_models as load_models_for_test;

use crate::{
    config::AnnotationsConfig,
    error::{BuildError, Error},
    extension::resolve_extensions,
    factory::{EntityFactory, NumberIdSource, SequentialIdSource},
    model::{AnnotationKey, AnnotationValue, CachingSession, MetaClass, Session},
};
use metaforge_schema::{
    node::{EntityIdentity, EntityInstance, EntityPackage, Stores},
    validate::validate_defs,
};
use std::{
    collections::BTreeMap,
    path::Path,
    sync::{Arc, RwLock},
    time::Instant,
};
use tracing::info;

///
/// MetadataBuilder
///

#[derive(Default)]
pub struct MetadataBuilder {
    packages: Vec<EntityPackage>,
    annotations: AnnotationsConfig,
    stores: Stores,
    id_source: Option<Arc<dyn NumberIdSource>>,
}

impl MetadataBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn package(mut self, package: EntityPackage) -> Self {
        self.packages.push(package);
        self
    }

    #[must_use]
    pub fn packages(mut self, packages: impl IntoIterator<Item = EntityPackage>) -> Self {
        self.packages.extend(packages);
        self
    }

    #[must_use]
    pub fn annotations(mut self, config: AnnotationsConfig) -> Self {
        self.annotations = config;
        self
    }

    /// Load annotation overrides from a document on disk.
    pub fn annotations_file(self, path: &Path) -> Result<Self, BuildError> {
        let config = crate::config::load_annotations_config(path)?;
        Ok(self.annotations(config))
    }

    #[must_use]
    pub fn stores(mut self, stores: Stores) -> Self {
        self.stores = stores;
        self
    }

    #[must_use]
    pub fn id_source(mut self, source: Arc<dyn NumberIdSource>) -> Self {
        self.id_source = Some(source);
        self
    }

    #[must_use]
    pub fn build(self) -> Metadata {
        let id_source = self
            .id_source
            .unwrap_or_else(|| Arc::new(SequentialIdSource::new()));

        Metadata {
            packages: self.packages,
            annotations: self.annotations,
            stores: self.stores,
            factory: EntityFactory::new(id_source),
            session: RwLock::new(None),
        }
    }
}

///
/// Metadata
///
/// Owner of the metadata session. The session is built lazily on first
/// access: one caller performs the full sequential pipeline while others
/// block, and a failed build publishes nothing, so a later call retries.
/// Once published the session is immutable and freely shared.
///

pub struct Metadata {
    packages: Vec<EntityPackage>,
    annotations: AnnotationsConfig,
    stores: Stores,
    factory: EntityFactory,
    session: RwLock<Option<Arc<CachingSession>>>,
}

impl Metadata {
    #[must_use]
    pub fn builder() -> MetadataBuilder {
        MetadataBuilder::new()
    }

    /// The published session, building it first if nobody has yet.
    pub fn session(&self) -> Result<Arc<CachingSession>, BuildError> {
        {
            let guard = self
                .session
                .read()
                .expect("session RwLock poisoned while acquiring read lock");
            if let Some(session) = guard.as_ref() {
                return Ok(session.clone());
            }
        }

        let mut guard = self
            .session
            .write()
            .expect("session RwLock poisoned while acquiring write lock");
        if let Some(session) = guard.as_ref() {
            return Ok(session.clone());
        }

        let session = Arc::new(self.init_metadata()?);
        *guard = Some(session.clone());

        Ok(session)
    }

    #[must_use]
    pub const fn stores(&self) -> &Stores {
        &self.stores
    }

    #[must_use]
    pub const fn factory(&self) -> &EntityFactory {
        &self.factory
    }

    /// Create an entity instance by metadata name.
    pub fn create(&self, name: &str) -> Result<Box<dyn EntityInstance>, Error> {
        let session = self.session()?;
        Ok(self.factory.create(session.session(), name)?)
    }

    /// Create an entity instance for a registered entity type.
    pub fn create_of<T: EntityIdentity>(&self) -> Result<Box<dyn EntityInstance>, Error> {
        self.create(T::DEF.name)
    }

    /// Create an entity instance for a descriptor.
    pub fn create_for_class(&self, class: &MetaClass) -> Result<Box<dyn EntityInstance>, Error> {
        self.create(class.name())
    }

    // The full sequential pipeline. Runs under the write lock; any failure
    // aborts initialization with nothing published.
    fn init_metadata(&self) -> Result<CachingSession, BuildError> {
        info!("initializing metadata");
        let started = Instant::now();

        validate_defs(&self.packages).map_err(BuildError::Validation)?;

        let mut session = Session::new();
        loader::load_models(&mut session, &self.packages);

        init_store_annotations(&mut session, &self.packages, &self.stores)?;
        resolve_extensions(&mut session)?;

        for name in session.class_names() {
            enrich::init_meta_annotations(&mut session, &name);
        }
        enrich::apply_annotation_overrides(&mut session, &self.annotations)?;

        rewrite::replace_extended_classes(&mut session);

        let session = CachingSession::new(session);
        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "metadata initialized"
        );

        Ok(session)
    }
}

// Record each class's backing store as an annotation. Skipped entirely when
// only the main store exists; an entity assigned to two stores is fatal.
fn init_store_annotations(
    session: &mut Session,
    packages: &[EntityPackage],
    stores: &Stores,
) -> Result<(), BuildError> {
    if !stores.has_additional() {
        return Ok(());
    }

    let mut path_to_store: BTreeMap<&str, &str> = BTreeMap::new();
    for package in packages {
        for info in &package.entities {
            if path_to_store.insert(info.def.type_path, info.store).is_some() {
                return Err(BuildError::DuplicateStore {
                    type_path: info.def.type_path.to_string(),
                });
            }
        }
    }

    for name in session.class_names() {
        let Some(class) = session.class(&name) else {
            continue;
        };
        let Some(store) = path_to_store.get(class.type_path()).copied() else {
            continue;
        };

        if let Some(class) = session.class_mut(&name) {
            class.annotations_mut().insert(
                AnnotationKey::Store,
                AnnotationValue::Str(store.to_string()),
            );
        }
    }

    Ok(())
}
