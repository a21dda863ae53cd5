use crate::model::AnnotationMap;
use metaforge_schema::types::{Cardinality, Primitive};

///
/// MetaProperty
///
/// One declared property of a class. `domain` names the owning class; both
/// the domain and a class-valued range are rewritten to effective classes
/// during the build and never change afterwards.
///

#[derive(Clone, Debug)]
pub struct MetaProperty {
    name: String,
    domain: String,
    range: Range,
    annotations: AnnotationMap,
}

impl MetaProperty {
    #[must_use]
    pub fn new(name: impl Into<String>, domain: impl Into<String>, range: Range) -> Self {
        Self {
            name: name.into(),
            domain: domain.into(),
            range,
            annotations: AnnotationMap::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the owning class.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    #[must_use]
    pub const fn range(&self) -> &Range {
        &self.range
    }

    #[must_use]
    pub const fn annotations(&self) -> &AnnotationMap {
        &self.annotations
    }

    pub fn annotations_mut(&mut self) -> &mut AnnotationMap {
        &mut self.annotations
    }

    pub(crate) fn set_domain(&mut self, domain: impl Into<String>) {
        self.domain = domain.into();
    }

    pub(crate) fn set_range(&mut self, range: Range) {
        self.range = range;
    }
}

///
/// Range
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Range {
    Datatype(Primitive),
    /// Enumeration range, by enum type path.
    Enumeration(String),
    Class(ClassRange),
}

impl Range {
    #[must_use]
    pub const fn is_class(&self) -> bool {
        matches!(self, Self::Class(_))
    }

    #[must_use]
    pub const fn as_class(&self) -> Option<&ClassRange> {
        match self {
            Self::Class(range) => Some(range),
            _ => None,
        }
    }
}

///
/// ClassRange
///
/// Class-valued range: target class name plus cardinality and ordering.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClassRange {
    target: String,
    cardinality: Cardinality,
    ordered: bool,
}

impl ClassRange {
    #[must_use]
    pub fn new(target: impl Into<String>, cardinality: Cardinality, ordered: bool) -> Self {
        Self {
            target: target.into(),
            cardinality,
            ordered,
        }
    }

    /// Name of the target class.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    #[must_use]
    pub const fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    #[must_use]
    pub const fn is_ordered(&self) -> bool {
        self.ordered
    }
}
