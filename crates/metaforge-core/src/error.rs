use crate::{config::ConfigError, extension::ConflictError, factory::CreationError};
use metaforge_schema::error::ErrorTree;
use thiserror::Error as ThisError;

///
/// NotFoundError
///
/// A name looked up on a non-nullable path does not exist. Propagated to the
/// caller as-is; never recovered internally.
///

#[derive(Debug, ThisError)]
pub enum NotFoundError {
    #[error("class '{0}' not found in metadata session")]
    Class(String),

    #[error("no class registered for type path '{0}'")]
    TypePath(String),

    #[error("model '{0}' not found in metadata session")]
    Model(String),

    #[error("property '{property}' not found on class '{class}'")]
    Property { class: String, property: String },
}

///
/// BuildError
///
/// Failure of the one-shot metadata build. Any variant aborts initialization
/// and leaves no session published.
///

#[derive(Debug, ThisError)]
pub enum BuildError {
    #[error("definition validation failed: {0}")]
    Validation(ErrorTree),

    #[error(transparent)]
    Conflict(#[from] ConflictError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("entity '{type_path}' cannot belong to more than one store")]
    DuplicateStore { type_path: String },
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    Creation(#[from] CreationError),
}
