use crate::model::{ClassRange, MetaClass, MetaModel, MetaProperty, Range, Session};
use metaforge_schema::node::{EntityDef, EntityPackage, FieldDef, FieldKind};
use std::collections::BTreeSet;

// Build one MetaModel per package and register every class descriptor with
// the session. Ancestors are restricted to classes the discovery pass
// actually produced; the def chain may run through undiscovered bases.
pub(crate) fn load_models(session: &mut Session, packages: &[EntityPackage]) {
    let mut discovered = BTreeSet::new();
    for package in packages {
        for info in &package.entities {
            discovered.insert(info.def.type_path);
        }
    }

    for package in packages {
        let mut model = MetaModel::new(&package.name);

        for info in &package.entities {
            let def = info.def;

            let ancestors = def
                .ancestors()
                .filter(|a| discovered.contains(a.type_path))
                .map(|a| a.name.to_string())
                .collect();

            let properties = def.fields.iter().map(|f| build_property(def, f)).collect();

            model.register_class(def.name, def.name);
            session.add_class(MetaClass::new(def, &package.name, ancestors, properties));
        }

        session.add_model(model);
    }
}

fn build_property(def: &'static EntityDef, field: &FieldDef) -> MetaProperty {
    let range = match field.kind {
        FieldKind::Primitive(primitive) => Range::Datatype(primitive),
        FieldKind::Enumeration(path) => Range::Enumeration(path.to_string()),
        FieldKind::Relation {
            target,
            cardinality,
            ordered,
        } => Range::Class(ClassRange::new(target.name, cardinality, ordered)),
    };

    MetaProperty::new(field.ident, def.name, range)
}
