use crate::{
    MAX_ENTITY_NAME_LEN, MAX_FIELD_NAME_LEN, err, error::ErrorTree, node::EntityPackage,
};
use std::collections::{BTreeMap, BTreeSet};

pub fn validate_naming(packages: &[EntityPackage], errs: &mut ErrorTree) {
    let mut by_name: BTreeMap<&str, &str> = BTreeMap::new();
    let mut by_path: BTreeMap<&str, &str> = BTreeMap::new();

    for package in packages {
        for info in &package.entities {
            let def = info.def;

            if def.name.is_empty() || def.name.len() > MAX_ENTITY_NAME_LEN {
                errs.add_at(
                    def.type_path,
                    format!(
                        "entity name '{}' must be 1-{MAX_ENTITY_NAME_LEN} characters",
                        def.name
                    ),
                );
            }

            if let Some(prev) = by_name.insert(def.name, def.type_path)
                && prev != def.type_path
            {
                err!(
                    errs,
                    "duplicate entity name '{}' for '{prev}' and '{}'",
                    def.name,
                    def.type_path
                );
            }

            if let Some(prev) = by_path.insert(def.type_path, package.name.as_str())
                && prev != package.name
            {
                err!(
                    errs,
                    "entity '{}' is declared in both package '{prev}' and package '{}'",
                    def.type_path,
                    package.name
                );
            }

            validate_fields(info.def, errs);
        }
    }
}

fn validate_fields(def: &crate::node::EntityDef, errs: &mut ErrorTree) {
    let mut seen: BTreeSet<&str> = BTreeSet::new();

    for field in def.fields.iter() {
        if field.ident.is_empty() || field.ident.len() > MAX_FIELD_NAME_LEN {
            errs.add_at(
                def.type_path,
                format!(
                    "field ident '{}' must be 1-{MAX_FIELD_NAME_LEN} characters",
                    field.ident
                ),
            );
        }

        if !seen.insert(field.ident) {
            errs.add_at(
                def.type_path,
                format!("duplicate field ident '{}'", field.ident),
            );
        }
    }
}
