use crate::{
    error::{BuildError, NotFoundError},
    model::{MetaClass, Session},
};
use metaforge_schema::node::EntityDef;
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

///
/// ConflictError
///
/// Two extensions were registered for the same base class and neither is a
/// subtype of the other. Fatal to initialization.
///

#[derive(Debug, ThisError)]
#[error("'{base}' is already extended by '{existing}'; cannot also register '{candidate}'")]
pub struct ConflictError {
    pub base: String,
    pub existing: String,
    pub candidate: String,
}

///
/// ExtendedEntities
///
/// Dedicated association tables for the extension mechanism: which class
/// extends which base (at most one extension per base), and which base names
/// have been replaced in the session indexes by their effective class.
///

#[derive(Clone, Debug, Default)]
pub struct ExtendedEntities {
    extended_by: BTreeMap<String, String>,
    replaced: BTreeMap<String, String>,
}

impl ExtendedEntities {
    /// The extension recorded for a base class, if any.
    #[must_use]
    pub fn extension_of(&self, base: &str) -> Option<&str> {
        self.extended_by.get(base).map(String::as_str)
    }

    #[must_use]
    pub fn is_extended(&self, name: &str) -> bool {
        self.extended_by.contains_key(name)
    }

    /// The effective class a base name was rebound to during rewriting.
    #[must_use]
    pub fn replaced_class(&self, base: &str) -> Option<&str> {
        self.replaced.get(base).map(String::as_str)
    }

    /// Resolve the effective class for a name: the most-derived class
    /// reachable over the extension chain, or the name itself.
    #[must_use]
    pub fn effective_class<'a>(&'a self, name: &'a str) -> &'a str {
        let mut current = name;
        while let Some(extension) = self.extended_by.get(current) {
            current = extension;
        }
        current
    }

    pub(crate) fn register_extension(&mut self, base: &str, extension: &str) {
        self.extended_by
            .insert(base.to_string(), extension.to_string());
    }

    pub(crate) fn register_replaced(&mut self, base: &str, effective: &str) {
        self.replaced.insert(base.to_string(), effective.to_string());
    }
}

/// Discover and validate extension associations over all loaded classes.
///
/// Every class's declared extension chain is walked transitively; each
/// (ancestor base, declaring class) pair is recorded on the base. A base that
/// already carries a different extension keeps the narrower of the two, and
/// fails the build when the candidates are unrelated.
pub(crate) fn resolve_extensions(session: &mut Session) -> Result<(), BuildError> {
    let defs: Vec<&'static EntityDef> = session.classes().map(MetaClass::def).collect();

    for def in defs {
        for base in def.extends_chain() {
            if session.class(base.name).is_none() {
                return Err(NotFoundError::Class(base.name.to_string()).into());
            }
            register(session, base, def)?;
        }
    }

    Ok(())
}

fn register(
    session: &mut Session,
    base: &'static EntityDef,
    candidate: &'static EntityDef,
) -> Result<(), BuildError> {
    let existing = session
        .extensions()
        .extension_of(base.name)
        .map(str::to_string);

    match existing {
        None => {
            session
                .extensions_mut()
                .register_extension(base.name, candidate.name);
        }

        // already covered
        Some(existing) if existing == candidate.name => {}

        Some(existing) => {
            let existing_def = session.class_nn(&existing)?.def();

            if existing_def.is_subtype_of(candidate) {
                // existing extension is the narrower type; keep it
            } else if candidate.is_subtype_of(existing_def) {
                session
                    .extensions_mut()
                    .register_extension(base.name, candidate.name);
            } else {
                return Err(ConflictError {
                    base: base.name.to_string(),
                    existing,
                    candidate: candidate.name.to_string(),
                }
                .into());
            }
        }
    }

    Ok(())
}
