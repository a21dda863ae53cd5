//! An HR-flavoured fixture schema: an extended employee entity, relations
//! that must be rewritten to the extension, a finance-store ledger, and a
//! system-level token hierarchy.

use metaforge::prelude::*;
use std::any::Any;

// impl_fixture_entity
macro_rules! impl_fixture_entity {
    ($ty:ident, $def:expr, long) => {
        impl EntityInstance for $ty {
            fn def(&self) -> &'static EntityDef {
                $def
            }
            fn generated_id(&self) -> Option<IdValue> {
                self.id.map(IdValue::Long)
            }
            fn assign_generated_id(&mut self, id: IdValue) {
                self.id = id.as_long();
            }
            fn as_any(&self) -> &dyn Any {
                self
            }
            fn as_any_mut(&mut self) -> &mut dyn Any {
                self
            }
        }

        impl EntityIdentity for $ty {
            const DEF: &'static EntityDef = $def;
        }
    };
    ($ty:ident, $def:expr, int) => {
        impl EntityInstance for $ty {
            fn def(&self) -> &'static EntityDef {
                $def
            }
            fn generated_id(&self) -> Option<IdValue> {
                self.id.map(IdValue::Int)
            }
            fn assign_generated_id(&mut self, id: IdValue) {
                self.id = id.as_int();
            }
            fn as_any(&self) -> &dyn Any {
                self
            }
            fn as_any_mut(&mut self) -> &mut dyn Any {
                self
            }
        }

        impl EntityIdentity for $ty {
            const DEF: &'static EntityDef = $def;
        }
    };
}

///
/// Employee
///

#[derive(Debug, Default)]
pub struct Employee {
    pub id: Option<i64>,
    pub full_name: String,
    pub badge: Option<String>,
}

pub static EMPLOYEE: EntityDef = EntityDef {
    ident: "Employee",
    name: "hr_Employee",
    type_path: "hr::Employee",
    parent: None,
    extends: None,
    id_kind: IdKind::Long,
    fields: FieldList {
        fields: &[
            FieldDef {
                ident: "full_name",
                kind: FieldKind::Primitive(Primitive::Text),
            },
            FieldDef {
                ident: "grade",
                kind: FieldKind::Primitive(Primitive::Int),
            },
        ],
    },
    markers: Markers {
        name_pattern: Some("%s|full_name"),
        enable_restore: Some(true),
        ..Markers::NONE
    },
    hooks: &[PostConstruct {
        name: "init_badge",
        invoke: |instance| {
            let badge = badge_of(instance)
                .ok_or_else(|| HookError::new("fixture instance has no badge"))?;
            *badge = Some("unissued".to_string());
            Ok(())
        },
    }],
    ctor: || Box::new(Employee::default()),
};

impl_fixture_entity!(Employee, &EMPLOYEE, long);

///
/// ContractEmployee
///

#[derive(Debug, Default)]
pub struct ContractEmployee {
    pub id: Option<i64>,
    pub full_name: String,
    pub badge: Option<String>,
    pub agency: String,
}

pub static CONTRACT_EMPLOYEE: EntityDef = EntityDef {
    ident: "ContractEmployee",
    name: "hr_ContractEmployee",
    type_path: "hr::ContractEmployee",
    parent: Some(&EMPLOYEE),
    extends: Some(&EMPLOYEE),
    id_kind: IdKind::Long,
    fields: FieldList {
        fields: &[FieldDef {
            ident: "agency",
            kind: FieldKind::Primitive(Primitive::Text),
        }],
    },
    markers: Markers::NONE,
    hooks: &[],
    ctor: || Box::new(ContractEmployee::default()),
};

impl_fixture_entity!(ContractEmployee, &CONTRACT_EMPLOYEE, long);

fn badge_of(instance: &mut dyn EntityInstance) -> Option<&mut Option<String>> {
    let any = instance.as_any_mut();
    if any.is::<ContractEmployee>() {
        return any
            .downcast_mut::<ContractEmployee>()
            .map(|e| &mut e.badge);
    }
    any.downcast_mut::<Employee>().map(|e| &mut e.badge)
}

///
/// Department
///

#[derive(Debug, Default)]
pub struct Department {
    pub id: Option<i64>,
    pub title: String,
}

pub static DEPARTMENT: EntityDef = EntityDef {
    ident: "Department",
    name: "hr_Department",
    type_path: "hr::Department",
    parent: None,
    extends: None,
    id_kind: IdKind::Long,
    fields: FieldList {
        fields: &[
            FieldDef {
                ident: "title",
                kind: FieldKind::Primitive(Primitive::Text),
            },
            FieldDef {
                ident: "head",
                kind: FieldKind::Relation {
                    target: &EMPLOYEE,
                    cardinality: Cardinality::One,
                    ordered: false,
                },
            },
            FieldDef {
                ident: "members",
                kind: FieldKind::Relation {
                    target: &EMPLOYEE,
                    cardinality: Cardinality::Many,
                    ordered: true,
                },
            },
        ],
    },
    markers: Markers::NONE,
    hooks: &[],
    ctor: || Box::new(Department::default()),
};

impl_fixture_entity!(Department, &DEPARTMENT, long);

///
/// Ledger (finance store)
///

#[derive(Debug, Default)]
pub struct Ledger {
    pub id: Option<i64>,
}

pub static LEDGER: EntityDef = EntityDef {
    ident: "Ledger",
    name: "fin_Ledger",
    type_path: "fin::Ledger",
    parent: None,
    extends: None,
    id_kind: IdKind::Long,
    fields: FieldList::EMPTY,
    markers: Markers::NONE,
    hooks: &[],
    ctor: || Box::new(Ledger::default()),
};

impl_fixture_entity!(Ledger, &LEDGER, long);

///
/// Badge (integer identity)
///

#[derive(Debug, Default)]
pub struct Badge {
    pub id: Option<i32>,
}

pub static BADGE: EntityDef = EntityDef {
    ident: "Badge",
    name: "hr_Badge",
    type_path: "hr::Badge",
    parent: None,
    extends: None,
    id_kind: IdKind::Integer,
    fields: FieldList::EMPTY,
    markers: Markers::NONE,
    hooks: &[],
    ctor: || Box::new(Badge::default()),
};

impl_fixture_entity!(Badge, &BADGE, int);

///
/// ApiToken / SessionToken (system-level hierarchy)
///

#[derive(Debug, Default)]
pub struct ApiToken {
    pub id: Option<i64>,
}

pub static API_TOKEN: EntityDef = EntityDef {
    ident: "ApiToken",
    name: "sec_ApiToken",
    type_path: "sec::ApiToken",
    parent: None,
    extends: None,
    id_kind: IdKind::Long,
    fields: FieldList::EMPTY,
    markers: Markers {
        system_level: Some(true),
        ..Markers::NONE
    },
    hooks: &[],
    ctor: || Box::new(ApiToken::default()),
};

impl_fixture_entity!(ApiToken, &API_TOKEN, long);

#[derive(Debug, Default)]
pub struct SessionToken {
    pub id: Option<i64>,
}

pub static SESSION_TOKEN: EntityDef = EntityDef {
    ident: "SessionToken",
    name: "sec_SessionToken",
    type_path: "sec::SessionToken",
    parent: Some(&API_TOKEN),
    extends: None,
    id_kind: IdKind::Long,
    fields: FieldList::EMPTY,
    markers: Markers::NONE,
    hooks: &[],
    ctor: || Box::new(SessionToken::default()),
};

impl_fixture_entity!(SessionToken, &SESSION_TOKEN, long);

///
/// Assembly helpers
///

pub fn hr_package() -> EntityPackage {
    EntityPackage::new(
        "hr",
        vec![
            EntityClassInfo::main(&EMPLOYEE),
            EntityClassInfo::main(&CONTRACT_EMPLOYEE),
            EntityClassInfo::main(&DEPARTMENT),
            EntityClassInfo::main(&BADGE),
        ],
    )
}

pub fn finance_package() -> EntityPackage {
    EntityPackage::new("finance", vec![EntityClassInfo::in_store(&LEDGER, "finance")])
}

pub fn security_package() -> EntityPackage {
    EntityPackage::new(
        "security",
        vec![
            EntityClassInfo::main(&API_TOKEN),
            EntityClassInfo::main(&SESSION_TOKEN),
        ],
    )
}

pub fn builder() -> MetadataBuilder {
    Metadata::builder()
        .package(hr_package())
        .package(finance_package())
        .package(security_package())
        .stores(Stores::new(vec!["finance".to_string()]))
}

pub fn metadata() -> Metadata {
    builder().build()
}
