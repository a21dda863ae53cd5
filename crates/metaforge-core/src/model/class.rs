use crate::model::{AnnotationMap, MetaProperty};
use metaforge_schema::node::EntityDef;

///
/// MetaClass
///
/// Descriptor for one loaded entity class. Owns its declared properties;
/// inherited properties are reachable through `ancestors` via the session.
///

#[derive(Clone, Debug)]
pub struct MetaClass {
    name: String,
    def: &'static EntityDef,
    model: String,
    ancestors: Vec<String>,
    properties: Vec<MetaProperty>,
    annotations: AnnotationMap,
}

impl MetaClass {
    #[must_use]
    pub fn new(
        def: &'static EntityDef,
        model: impl Into<String>,
        ancestors: Vec<String>,
        properties: Vec<MetaProperty>,
    ) -> Self {
        Self {
            name: def.name.to_string(),
            def,
            model: model.into(),
            ancestors,
            properties,
            annotations: AnnotationMap::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn def(&self) -> &'static EntityDef {
        self.def
    }

    #[must_use]
    pub const fn type_path(&self) -> &'static str {
        self.def.type_path
    }

    /// Name of the owning model.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Loaded ancestor class names, nearest first.
    #[must_use]
    pub fn ancestors(&self) -> &[String] {
        &self.ancestors
    }

    /// Declared properties, in declaration order.
    pub fn own_properties(&self) -> impl Iterator<Item = &MetaProperty> {
        self.properties.iter()
    }

    #[must_use]
    pub fn own_property(&self, name: &str) -> Option<&MetaProperty> {
        self.properties.iter().find(|p| p.name() == name)
    }

    pub(crate) fn own_property_mut(&mut self, name: &str) -> Option<&mut MetaProperty> {
        self.properties.iter_mut().find(|p| p.name() == name)
    }

    #[must_use]
    pub const fn annotations(&self) -> &AnnotationMap {
        &self.annotations
    }

    pub fn annotations_mut(&mut self) -> &mut AnnotationMap {
        &mut self.annotations
    }
}
