use crate::{error::ErrorTree, node::{EntityPackage, FieldKind}};
use std::collections::BTreeSet;

// Validate that every relation field targets an entity the discovery pass
// actually produced; a dangling target would surface much later as a failed
// session lookup during rewriting.
pub fn validate_relation_targets(packages: &[EntityPackage], errs: &mut ErrorTree) {
    let mut discovered = BTreeSet::new();
    for package in packages {
        for info in &package.entities {
            discovered.insert(info.def.type_path);
        }
    }

    for package in packages {
        for info in &package.entities {
            for field in info.def.fields.iter() {
                let FieldKind::Relation { target, .. } = field.kind else {
                    continue;
                };

                if !discovered.contains(target.type_path) {
                    errs.add_at(
                        info.def.type_path,
                        format!(
                            "field '{}' targets undiscovered entity '{}'",
                            field.ident, target.type_path
                        ),
                    );
                }
            }
        }
    }
}
