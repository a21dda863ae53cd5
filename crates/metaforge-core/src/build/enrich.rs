use crate::{
    config::AnnotationsConfig,
    error::{BuildError, NotFoundError},
    model::{AnnotationKey, AnnotationValue, Session},
};
use metaforge_schema::node::{EntityDef, Markers};
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

// Shape of a type-path-like reference in annotation text.
static TYPE_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z_][A-Za-z0-9_]*::)*[A-Za-z_][A-Za-z0-9_]*$")
        .expect("type path pattern is well-formed")
});

/// Copy the recognized class-level markers onto a class's annotation map.
///
/// All markers except the system-level one fall back to the nearest ancestor
/// that declares them; system-level is read from the class itself only.
pub(crate) fn init_meta_annotations(session: &mut Session, name: &str) {
    let Some(class) = session.class(name) else {
        return;
    };
    let def = class.def();

    let name_pattern = marker_with_fallback(def, |m| m.name_pattern);
    let enable_restore = marker_with_fallback(def, |m| m.enable_restore);
    let track_edit_history = marker_with_fallback(def, |m| m.track_edit_history);

    // system-level is not propagated down the hierarchy
    let system_level = def.markers.system_level;

    let Some(class) = session.class_mut(name) else {
        return;
    };
    let annotations = class.annotations_mut();

    if let Some(pattern) = name_pattern {
        annotations.insert(
            AnnotationKey::NamePattern,
            AnnotationValue::Str(pattern.to_string()),
        );
    }
    if let Some(value) = enable_restore {
        annotations.insert(AnnotationKey::EnableRestore, AnnotationValue::Bool(value));
    }
    if let Some(value) = track_edit_history {
        annotations.insert(
            AnnotationKey::TrackEditHistory,
            AnnotationValue::Bool(value),
        );
    }
    if let Some(value) = system_level {
        annotations.insert(AnnotationKey::SystemLevel, AnnotationValue::Bool(value));
    }
}

fn marker_with_fallback<T: Copy>(
    def: &'static EntityDef,
    get: impl Fn(&Markers) -> Option<T>,
) -> Option<T> {
    get(&def.markers).or_else(|| def.ancestors().find_map(|a| get(&a.markers)))
}

/// Apply configuration-declared annotation overrides on top of the
/// marker-derived defaults. Fragments naming an unknown entity are skipped
/// with a warning; an unknown property is a hard failure.
pub(crate) fn apply_annotation_overrides(
    session: &mut Session,
    config: &AnnotationsConfig,
) -> Result<(), BuildError> {
    for entry in &config.entities {
        let Some(class) = session.class_by_path(&entry.entity) else {
            warn!(
                entity = %entry.entity,
                "annotation override targets an unknown entity, skipping fragment"
            );
            continue;
        };
        let class_name = class.name().to_string();

        let class_values: Vec<(AnnotationKey, AnnotationValue)> = entry
            .annotations
            .iter()
            .map(|(key, text)| (AnnotationKey::parse(key), infer_annotation_value(session, text)))
            .collect();

        if let Some(class) = session.class_mut(&class_name) {
            for (key, value) in class_values {
                class.annotations_mut().insert(key, value);
            }
        }

        for property_override in &entry.properties {
            let owner = {
                let class = session.class_nn(&class_name)?;
                if class.own_property(&property_override.property).is_some() {
                    Some(class_name.clone())
                } else {
                    class
                        .ancestors()
                        .iter()
                        .find(|ancestor| {
                            session
                                .class(ancestor)
                                .is_some_and(|c| c.own_property(&property_override.property).is_some())
                        })
                        .cloned()
                }
            };

            let Some(owner) = owner else {
                return Err(NotFoundError::Property {
                    class: class_name,
                    property: property_override.property.clone(),
                }
                .into());
            };

            let values: Vec<(AnnotationKey, AnnotationValue)> = property_override
                .annotations
                .iter()
                .map(|(key, text)| (AnnotationKey::parse(key), infer_annotation_value(session, text)))
                .collect();

            if let Some(property) = session
                .class_mut(&owner)
                .and_then(|c| c.own_property_mut(&property_override.property))
            {
                for (key, value) in values {
                    property.annotations_mut().insert(key, value);
                }
            }
        }
    }

    Ok(())
}

/// Infer the typed value of an annotation's textual form.
///
/// Priority: boolean literal, then a type-path-shaped reference (best effort;
/// falls back to the literal string when no class is registered under it),
/// then an unsigned integer literal, then a plain string.
pub fn infer_annotation_value(session: &Session, text: &str) -> AnnotationValue {
    if text.eq_ignore_ascii_case("true") {
        return AnnotationValue::Bool(true);
    }
    if text.eq_ignore_ascii_case("false") {
        return AnnotationValue::Bool(false);
    }

    if TYPE_PATH_RE.is_match(text) {
        if session.class_by_path(text).is_some() {
            return AnnotationValue::TypeRef(text.to_string());
        }
        return AnnotationValue::Str(text.to_string());
    }

    if !text.is_empty()
        && text.bytes().all(|b| b.is_ascii_digit())
        && let Ok(value) = text.parse::<i64>()
    {
        return AnnotationValue::Int(value);
    }

    AnnotationValue::Str(text.to_string())
}
