//! ## Crate layout
//! - `core`: the metadata session model, build pipeline, and entity factory.
//! - `schema`: static entity defs, discovery inputs, types, and validation.
//!
//! The `prelude` module mirrors the surface application code uses: the
//! metadata owner, session types, and the schema vocabulary for declaring
//! entity defs.

pub use metaforge_core as core;
pub use metaforge_schema as schema;

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use metaforge_core::{Error, Metadata, MetadataBuilder};

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::{
        build::{Metadata, MetadataBuilder},
        config::{AnnotationsConfig, EntityAnnotations, PropertyAnnotations},
        extension::ExtendedEntities,
        factory::{EntityFactory, NumberIdSource, SequentialIdSource},
        model::{
            AnnotationKey, AnnotationValue, CachingSession, ClassRange, MetaClass, MetaModel,
            MetaProperty, Range, Session,
        },
        tools,
    };
    pub use crate::schema::{
        node::{
            EntityClassInfo, EntityDef, EntityIdentity, EntityInstance, EntityPackage, FieldDef,
            FieldKind, FieldList, HookError, IdValue, MAIN_STORE, Markers, PostConstruct, Stores,
        },
        types::{Cardinality, IdKind, Primitive},
    };
}
