use crate::{error::ErrorTree, node::EntityPackage};
use std::collections::BTreeSet;

// Validate extension declarations: self-extension, non-ancestor targets, and
// cycles in the declared chain (statics can legally form reference cycles).
pub fn validate_hierarchy(packages: &[EntityPackage], errs: &mut ErrorTree) {
    for package in packages {
        for info in &package.entities {
            let def = info.def;

            let Some(base) = def.extends else {
                continue;
            };

            if base.type_path == def.type_path {
                errs.add_at(def.type_path, "entity declares itself as its extension base");
                continue;
            }

            if !def.is_subtype_of(base) {
                errs.add_at(
                    def.type_path,
                    format!(
                        "extension base '{}' is not an ancestor of the declaring entity",
                        base.type_path
                    ),
                );
            }

            validate_chain(def, errs);
        }
    }
}

// Follow the extends chain with a visited set; report once per declaring def.
fn validate_chain(def: &'static crate::node::EntityDef, errs: &mut ErrorTree) {
    let mut visited = BTreeSet::new();
    visited.insert(def.type_path);

    for base in def.extends_chain() {
        if !visited.insert(base.type_path) {
            errs.add_at(
                def.type_path,
                format!("extension chain cycles through '{}'", base.type_path),
            );
            return;
        }
    }
}
