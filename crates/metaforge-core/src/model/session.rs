use crate::{
    error::NotFoundError,
    extension::ExtendedEntities,
    model::{MetaClass, MetaModel, MetaProperty},
};
use std::collections::BTreeMap;

///
/// Session
///
/// The root registry of loaded models and class descriptors. Descriptors live
/// in a single arena keyed by canonical class name; the name and type-path
/// indexes decide which descriptor a lookup resolves to. Extension
/// replacement rebinds index entries, never the arena itself, so exactly one
/// descriptor is resolvable per name at any time.
///

#[derive(Debug, Default)]
pub struct Session {
    classes: BTreeMap<String, MetaClass>,
    class_index: BTreeMap<String, String>,
    type_index: BTreeMap<String, String>,
    models: BTreeMap<String, MetaModel>,
    extensions: ExtendedEntities,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    //
    // registration (build-time only)
    //

    pub(crate) fn add_model(&mut self, model: MetaModel) {
        self.models.insert(model.name().to_string(), model);
    }

    pub(crate) fn add_class(&mut self, class: MetaClass) {
        let name = class.name().to_string();
        self.type_index
            .insert(class.type_path().to_string(), name.clone());
        self.class_index.insert(name.clone(), name.clone());
        self.classes.insert(name, class);
    }

    pub(crate) fn class_mut(&mut self, name: &str) -> Option<&mut MetaClass> {
        let canonical = self.class_index.get(name)?.clone();
        self.classes.get_mut(&canonical)
    }

    pub(crate) const fn extensions_mut(&mut self) -> &mut ExtendedEntities {
        &mut self.extensions
    }

    /// Rebind a declared class name (and its type path) to the effective
    /// descriptor, in the owning model, the session indexes, and the
    /// replaced-class registry.
    pub(crate) fn apply_replacement(&mut self, model: &str, declared: &str, effective: &str) {
        let type_path = self
            .classes
            .get(declared)
            .map(|c| c.type_path().to_string());

        self.extensions.register_replaced(declared, effective);
        self.class_index
            .insert(declared.to_string(), effective.to_string());
        if let Some(path) = type_path {
            self.type_index.insert(path, effective.to_string());
        }
        if let Some(model) = self.models.get_mut(model) {
            model.register_class(declared, effective);
        }
    }

    //
    // lookups
    //

    #[must_use]
    pub fn class(&self, name: &str) -> Option<&MetaClass> {
        let canonical = self.class_index.get(name)?;
        self.classes.get(canonical)
    }

    pub fn class_nn(&self, name: &str) -> Result<&MetaClass, NotFoundError> {
        self.class(name)
            .ok_or_else(|| NotFoundError::Class(name.to_string()))
    }

    #[must_use]
    pub fn class_by_path(&self, type_path: &str) -> Option<&MetaClass> {
        let canonical = self.type_index.get(type_path)?;
        self.classes.get(canonical)
    }

    pub fn class_by_path_nn(&self, type_path: &str) -> Result<&MetaClass, NotFoundError> {
        self.class_by_path(type_path)
            .ok_or_else(|| NotFoundError::TypePath(type_path.to_string()))
    }

    /// Distinct resolvable descriptors: replaced classes are excluded.
    pub fn classes(&self) -> impl Iterator<Item = &MetaClass> {
        self.classes
            .values()
            .filter(|class| self.class_index.get(class.name()).map(String::as_str) == Some(class.name()))
    }

    /// Snapshot of distinct canonical class names; build passes iterate this
    /// while mutating the arena.
    #[must_use]
    pub fn class_names(&self) -> Vec<String> {
        self.classes().map(|c| c.name().to_string()).collect()
    }

    #[must_use]
    pub fn model(&self, name: &str) -> Option<&MetaModel> {
        self.models.get(name)
    }

    pub fn model_nn(&self, name: &str) -> Result<&MetaModel, NotFoundError> {
        self.model(name)
            .ok_or_else(|| NotFoundError::Model(name.to_string()))
    }

    pub fn models(&self) -> impl Iterator<Item = &MetaModel> {
        self.models.values()
    }

    #[must_use]
    pub fn model_names(&self) -> Vec<String> {
        self.models.keys().cloned().collect()
    }

    /// Find a property on a class, searching own properties first and then
    /// the ancestor chain nearest-first. Ancestors resolve to their original
    /// descriptors even when the ancestor's name has been rebound to an
    /// effective class, so inherited properties stay visible.
    #[must_use]
    pub fn property<'a>(&'a self, class: &'a MetaClass, name: &str) -> Option<&'a MetaProperty> {
        if let Some(property) = class.own_property(name) {
            return Some(property);
        }

        for ancestor in class.ancestors() {
            if let Some(property) = self.classes.get(ancestor).and_then(|c| c.own_property(name)) {
                return Some(property);
            }
        }

        None
    }

    pub fn property_nn<'a>(
        &'a self,
        class: &'a MetaClass,
        name: &str,
    ) -> Result<&'a MetaProperty, NotFoundError> {
        self.property(class, name)
            .ok_or_else(|| NotFoundError::Property {
                class: class.name().to_string(),
                property: name.to_string(),
            })
    }

    #[must_use]
    pub const fn extensions(&self) -> &ExtendedEntities {
        &self.extensions
    }
}

///
/// CachingSession
///
/// Read-only published wrapper. The distinct class list is computed once at
/// publication so steady-state enumeration and lookups never re-derive it;
/// the inner session is immutable from here on.
///

#[derive(Debug)]
pub struct CachingSession {
    inner: Session,
    class_names: Vec<String>,
}

impl CachingSession {
    #[must_use]
    pub(crate) fn new(inner: Session) -> Self {
        let class_names = inner.class_names();
        Self { inner, class_names }
    }

    #[must_use]
    pub fn class(&self, name: &str) -> Option<&MetaClass> {
        self.inner.class(name)
    }

    pub fn class_nn(&self, name: &str) -> Result<&MetaClass, NotFoundError> {
        self.inner.class_nn(name)
    }

    #[must_use]
    pub fn class_by_path(&self, type_path: &str) -> Option<&MetaClass> {
        self.inner.class_by_path(type_path)
    }

    pub fn class_by_path_nn(&self, type_path: &str) -> Result<&MetaClass, NotFoundError> {
        self.inner.class_by_path_nn(type_path)
    }

    pub fn classes(&self) -> impl Iterator<Item = &MetaClass> {
        self.class_names
            .iter()
            .filter_map(|name| self.inner.class(name))
    }

    #[must_use]
    pub fn model(&self, name: &str) -> Option<&MetaModel> {
        self.inner.model(name)
    }

    pub fn model_nn(&self, name: &str) -> Result<&MetaModel, NotFoundError> {
        self.inner.model_nn(name)
    }

    pub fn models(&self) -> impl Iterator<Item = &MetaModel> {
        self.inner.models()
    }

    #[must_use]
    pub fn property<'a>(&'a self, class: &'a MetaClass, name: &str) -> Option<&'a MetaProperty> {
        self.inner.property(class, name)
    }

    pub fn property_nn<'a>(
        &'a self,
        class: &'a MetaClass,
        name: &str,
    ) -> Result<&'a MetaProperty, NotFoundError> {
        self.inner.property_nn(class, name)
    }

    #[must_use]
    pub const fn extensions(&self) -> &ExtendedEntities {
        self.inner.extensions()
    }

    /// Access the underlying session (read-only).
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.inner
    }
}
