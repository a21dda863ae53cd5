use std::{collections::BTreeMap, fmt, str::FromStr};

///
/// AnnotationKey
///
/// Closed enumeration of the recognized class/property annotation kinds,
/// with an escape hatch for configuration-declared custom keys.
///

#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum AnnotationKey {
    EnableRestore,
    NamePattern,
    Store,
    SystemLevel,
    TrackEditHistory,
    Custom(String),
}

impl AnnotationKey {
    /// Parse a textual key as used in annotation configuration.
    #[must_use]
    pub fn parse(key: &str) -> Self {
        match key {
            "enableRestore" => Self::EnableRestore,
            "namePattern" => Self::NamePattern,
            "store" => Self::Store,
            "systemLevel" => Self::SystemLevel,
            "trackEditHistory" => Self::TrackEditHistory,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl FromStr for AnnotationKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for AnnotationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self {
            Self::EnableRestore => "enableRestore",
            Self::NamePattern => "namePattern",
            Self::Store => "store",
            Self::SystemLevel => "systemLevel",
            Self::TrackEditHistory => "trackEditHistory",
            Self::Custom(key) => key,
        };
        write!(f, "{key}")
    }
}

///
/// AnnotationValue
///
/// Tagged value carried in annotation maps. Configuration text is inferred
/// into one of these variants; marker enrichment writes them directly.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AnnotationValue {
    Bool(bool),
    Int(i64),
    Str(String),
    /// Reference to a registered entity type, by type path.
    TypeRef(String),
}

impl AnnotationValue {
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_type_ref(&self) -> Option<&str> {
        match self {
            Self::TypeRef(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for AnnotationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Str(v) => write!(f, "{v}"),
            Self::TypeRef(v) => write!(f, "{v}"),
        }
    }
}

///
/// AnnotationMap
///

#[derive(Clone, Debug, Default)]
pub struct AnnotationMap {
    entries: BTreeMap<AnnotationKey, AnnotationValue>,
}

impl AnnotationMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: &AnnotationKey) -> Option<&AnnotationValue> {
        self.entries.get(key)
    }

    /// Set or overwrite a key.
    pub fn insert(&mut self, key: AnnotationKey, value: AnnotationValue) {
        self.entries.insert(key, value);
    }

    #[must_use]
    pub fn contains(&self, key: &AnnotationKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AnnotationKey, &AnnotationValue)> {
        self.entries.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
