//! Definition validation orchestration and shared helpers.

pub mod hierarchy;
pub mod naming;
pub mod relation;

use crate::{error::ErrorTree, node::EntityPackage};

/// Run full definition validation in a staged, deterministic order.
pub fn validate_defs(packages: &[EntityPackage]) -> Result<(), ErrorTree> {
    let mut errors = ErrorTree::new();

    // Phase 1: per-def structural invariants.
    naming::validate_naming(packages, &mut errors);

    // Phase 2: cross-def invariants over the whole discovered set.
    hierarchy::validate_hierarchy(packages, &mut errors);
    relation::validate_relation_targets(packages, &mut errors);

    errors.result()
}
