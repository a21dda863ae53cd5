//! Core runtime for Metaforge: the metadata session model, the one-shot build
//! pipeline (loading, extension resolution, enrichment, graph rewriting), and
//! the entity factory.

pub mod build;
pub mod config;
pub mod error;
pub mod extension;
pub mod factory;
pub mod model;
pub mod tools;

// test
#[cfg(test)]
pub(crate) mod test_support;

pub use build::{Metadata, MetadataBuilder};
pub use error::Error;

///
/// Prelude
///
/// Domain vocabulary only; errors and build internals stay at their modules.
///

pub mod prelude {
    pub use crate::{
        build::{Metadata, MetadataBuilder},
        extension::ExtendedEntities,
        factory::{EntityFactory, NumberIdSource, SequentialIdSource},
        model::{
            AnnotationKey, AnnotationValue, CachingSession, ClassRange, MetaClass, MetaModel,
            MetaProperty, Range, Session,
        },
    };
    pub use metaforge_schema::prelude::*;
}
