use std::collections::BTreeMap;

///
/// MetaModel
///
/// A named group of classes loaded from one logical package. Entries map the
/// declared class name to the canonical descriptor name in the session arena;
/// re-registration rebinds a declared name to a different descriptor without
/// disturbing other models.
///

#[derive(Clone, Debug)]
pub struct MetaModel {
    name: String,
    classes: BTreeMap<String, String>,
}

impl MetaModel {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            classes: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bind a declared class name to a canonical descriptor name, replacing
    /// any previous binding.
    pub fn register_class(&mut self, declared: impl Into<String>, canonical: impl Into<String>) {
        self.classes.insert(declared.into(), canonical.into());
    }

    #[must_use]
    pub fn resolve(&self, declared: &str) -> Option<&str> {
        self.classes.get(declared).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, declared: &str) -> bool {
        self.classes.contains_key(declared)
    }

    /// Iterate (declared name, canonical name) bindings.
    pub fn bindings(&self) -> impl Iterator<Item = (&str, &str)> {
        self.classes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
