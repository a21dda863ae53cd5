//! Read-side helpers over class annotation maps.

use crate::model::{AnnotationKey, AnnotationValue, MetaClass};
use metaforge_schema::node::MAIN_STORE;

/// Name of the store backing a class; the main store when untagged.
#[must_use]
pub fn store_name(class: &MetaClass) -> &str {
    class
        .annotations()
        .get(&AnnotationKey::Store)
        .and_then(AnnotationValue::as_str)
        .unwrap_or(MAIN_STORE)
}

#[must_use]
pub fn is_main_store(class: &MetaClass) -> bool {
    store_name(class) == MAIN_STORE
}

#[must_use]
pub fn is_system_level(class: &MetaClass) -> bool {
    class
        .annotations()
        .get(&AnnotationKey::SystemLevel)
        .and_then(AnnotationValue::as_bool)
        .unwrap_or(false)
}

#[must_use]
pub fn name_pattern(class: &MetaClass) -> Option<&str> {
    class
        .annotations()
        .get(&AnnotationKey::NamePattern)
        .and_then(AnnotationValue::as_str)
}

#[must_use]
pub fn is_restore_enabled(class: &MetaClass) -> bool {
    class
        .annotations()
        .get(&AnnotationKey::EnableRestore)
        .and_then(AnnotationValue::as_bool)
        .unwrap_or(false)
}

#[must_use]
pub fn is_edit_history_tracked(class: &MetaClass) -> bool {
    class
        .annotations()
        .get(&AnnotationKey::TrackEditHistory)
        .and_then(AnnotationValue::as_bool)
        .unwrap_or(false)
}
