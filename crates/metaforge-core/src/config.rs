use serde::Deserialize;
use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;
use tracing::warn;

// Included files may include further files; bound the chase.
const MAX_INCLUDE_DEPTH: usize = 8;

///
/// ConfigError
///
/// Failure to load the top-level annotations document. Include-file problems
/// are soft failures handled inside the loader.
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("cannot read annotations config '{path}': {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed annotations config '{path}': {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

///
/// AnnotationsConfig
///
/// Declarative annotation overrides, applied after marker enrichment. Keyed
/// by fully-qualified entity type path; values are textual and type-inferred
/// at application time.
///

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AnnotationsConfig {
    #[serde(default)]
    pub includes: Vec<PathBuf>,

    #[serde(default)]
    pub entities: Vec<EntityAnnotations>,
}

impl AnnotationsConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

///
/// EntityAnnotations
///

#[derive(Clone, Debug, Deserialize)]
pub struct EntityAnnotations {
    /// Fully-qualified type path of the target entity.
    pub entity: String,

    #[serde(default)]
    pub annotations: BTreeMap<String, String>,

    #[serde(default)]
    pub properties: Vec<PropertyAnnotations>,
}

///
/// PropertyAnnotations
///

#[derive(Clone, Debug, Deserialize)]
pub struct PropertyAnnotations {
    pub property: String,

    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
}

/// Load an annotations document and flatten its include chain.
///
/// A malformed or unreadable top-level document is fatal; a bad include is
/// logged and skipped, per-fragment.
pub fn load_annotations_config(path: &Path) -> Result<AnnotationsConfig, ConfigError> {
    let mut config = read_document(path)?;

    let includes = std::mem::take(&mut config.includes);
    let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    for include in includes {
        merge_include(&mut config, &base_dir, &include, 1);
    }

    Ok(config)
}

fn read_document(path: &Path) -> Result<AnnotationsConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&text).map_err(|source| ConfigError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

// Soft-fail include resolution: any problem drops the fragment with a
// warning and the rest of the document survives.
fn merge_include(config: &mut AnnotationsConfig, base_dir: &Path, include: &Path, depth: usize) {
    if depth > MAX_INCLUDE_DEPTH {
        warn!(include = %include.display(), "include nesting too deep, skipping");
        return;
    }

    let resolved = if include.is_absolute() {
        include.to_path_buf()
    } else {
        base_dir.join(include)
    };

    match read_document(&resolved) {
        Ok(mut included) => {
            let nested = std::mem::take(&mut included.includes);
            config.entities.extend(included.entities);

            let nested_dir = resolved.parent().map(Path::to_path_buf).unwrap_or_default();
            for inner in nested {
                merge_include(config, &nested_dir, &inner, depth + 1);
            }
        }
        Err(err) => {
            warn!(include = %resolved.display(), error = %err, "skipping annotations include");
        }
    }
}
