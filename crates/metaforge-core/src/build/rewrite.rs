use crate::model::{ClassRange, Range, Session};
use std::time::Instant;
use tracing::debug;

/// Rewrite every class and property reference in the session to its
/// effective (most-extended) class.
///
/// Each model is processed in two phases: a scan that rewrites property
/// domains and class ranges in place and queues class replacements, then an
/// apply step that rebinds the queued names in the model and session indexes.
/// Replacements are never visible to classes still being scanned.
pub(crate) fn replace_extended_classes(session: &mut Session) {
    let started = Instant::now();

    for model_name in session.model_names() {
        let bindings: Vec<(String, String)> = session
            .model(&model_name)
            .map(|model| {
                model
                    .bindings()
                    .map(|(declared, canonical)| (declared.to_string(), canonical.to_string()))
                    .collect()
            })
            .unwrap_or_default();

        let mut replacements: Vec<(String, String)> = Vec::new();

        for (declared, canonical) in bindings {
            let effective = session.extensions().effective_class(&canonical).to_string();
            if effective != canonical {
                replacements.push((declared, effective));
            }

            rewrite_properties(session, &canonical);
        }

        for (declared, effective) in replacements {
            session.apply_replacement(&model_name, &declared, &effective);
        }
    }

    debug!(
        elapsed_us = started.elapsed().as_micros() as u64,
        "replaced extended classes"
    );
}

// Rewrite domains and class ranges of one class's own properties.
fn rewrite_properties(session: &mut Session, class_name: &str) {
    let updates: Vec<(String, Option<String>, Option<Range>)> = {
        let Some(class) = session.class(class_name) else {
            return;
        };

        class
            .own_properties()
            .filter_map(|property| {
                let new_domain = {
                    let effective = session.extensions().effective_class(property.domain());
                    (effective != property.domain()).then(|| effective.to_string())
                };

                let new_range = property.range().as_class().and_then(|range| {
                    let effective = session.extensions().effective_class(range.target());
                    (effective != range.target()).then(|| {
                        Range::Class(ClassRange::new(
                            effective,
                            range.cardinality(),
                            range.is_ordered(),
                        ))
                    })
                });

                (new_domain.is_some() || new_range.is_some())
                    .then(|| (property.name().to_string(), new_domain, new_range))
            })
            .collect()
    };

    if updates.is_empty() {
        return;
    }

    let Some(class) = session.class_mut(class_name) else {
        return;
    };
    for (name, domain, range) in updates {
        let Some(property) = class.own_property_mut(&name) else {
            continue;
        };
        if let Some(domain) = domain {
            property.set_domain(domain);
        }
        if let Some(range) = range {
            property.set_range(range);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build::loader, extension::resolve_extensions, test_support::fixtures};

    fn built_session() -> Session {
        let packages = vec![fixtures::sales_package(), fixtures::docs_package()];
        let mut session = Session::new();
        loader::load_models(&mut session, &packages);
        resolve_extensions(&mut session).unwrap();
        replace_extended_classes(&mut session);
        session
    }

    // (class, property, domain, class-range target) across all resolvable
    // classes, for before/after comparison.
    fn graph_snapshot(session: &Session) -> Vec<(String, String, String, Option<String>)> {
        let mut snapshot = Vec::new();
        for class in session.classes() {
            for property in class.own_properties() {
                snapshot.push((
                    class.name().to_string(),
                    property.name().to_string(),
                    property.domain().to_string(),
                    property
                        .range()
                        .as_class()
                        .map(|r| r.target().to_string()),
                ));
            }
        }
        snapshot
    }

    #[test]
    fn base_names_resolve_to_effective_descriptors() {
        let session = built_session();

        assert_eq!(
            session.extensions().replaced_class("test_Customer"),
            Some("test_VipCustomer")
        );
        assert_eq!(session.class_nn("test_Customer").unwrap().name(), "test_VipCustomer");
        assert_eq!(
            session.class_nn("test_ExtCustomer").unwrap().name(),
            "test_VipCustomer"
        );
        assert_eq!(
            session
                .class_by_path_nn("fixtures::Customer")
                .unwrap()
                .name(),
            "test_VipCustomer"
        );

        let model = session.model_nn("sales").unwrap();
        assert_eq!(model.resolve("test_Customer"), Some("test_VipCustomer"));
        assert_eq!(model.resolve("test_Order"), Some("test_Order"));
    }

    #[test]
    fn class_ranges_carry_cardinality_and_ordering() {
        let session = built_session();
        let order = session.class_nn("test_Order").unwrap();

        let customer = order.own_property("customer").unwrap();
        let range = customer.range().as_class().unwrap();
        assert_eq!(range.target(), "test_VipCustomer");
        assert_eq!(range.cardinality(), metaforge_schema::types::Cardinality::One);
        assert!(!range.is_ordered());

        let lines = order.own_property("lines").unwrap();
        let range = lines.range().as_class().unwrap();
        assert_eq!(range.target(), "test_OrderLine");
        assert_eq!(range.cardinality(), metaforge_schema::types::Cardinality::Many);
        assert!(range.is_ordered());
    }

    #[test]
    fn no_reachable_reference_has_an_active_extension() {
        let session = built_session();

        for (class, property, domain, target) in graph_snapshot(&session) {
            assert!(
                !session.extensions().is_extended(&domain),
                "{class}.{property} domain '{domain}' still has an extension"
            );
            if let Some(target) = target {
                assert!(
                    !session.extensions().is_extended(&target),
                    "{class}.{property} targets '{target}' which still has an extension"
                );
            }
        }
    }

    #[test]
    fn inherited_property_domains_point_at_the_effective_class() {
        let session = built_session();
        let vip = session.class_nn("test_Customer").unwrap();

        // "name" is declared on the replaced base; it must remain reachable
        // through the ancestor chain with a rewritten domain.
        let name = session.property_nn(vip, "name").unwrap();
        assert_eq!(name.domain(), "test_VipCustomer");
    }

    #[test]
    fn replaced_classes_are_excluded_from_enumeration() {
        let session = built_session();
        let names: Vec<&str> = session.classes().map(|c| c.name()).collect();

        assert!(names.contains(&"test_VipCustomer"));
        assert!(!names.contains(&"test_Customer"));
        assert!(!names.contains(&"test_ExtCustomer"));
    }

    #[test]
    fn rewriting_is_idempotent() {
        let mut session = built_session();
        let before = graph_snapshot(&session);

        replace_extended_classes(&mut session);

        assert_eq!(before, graph_snapshot(&session));
    }
}
