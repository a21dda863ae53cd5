//! Shared fixture schema for unit tests: a sales package with an extension
//! chain and relations, and a docs package exercising hooks, markers, and
//! store tags.

use crate::build::{Metadata, MetadataBuilder};
use metaforge_schema::{
    node::{
        EntityClassInfo, EntityDef, EntityIdentity, EntityInstance, EntityPackage, FieldDef,
        FieldKind, FieldList, HookError, IdValue, Markers, PostConstruct, Stores,
    },
    types::{Cardinality, IdKind, Primitive},
};
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
    ($ty:ident, $def:expr, none) => {
        impl EntityInstance for $ty {
            fn def(&self) -> &'static EntityDef {
                $def
            }
            fn generated_id(&self) -> Option<IdValue> {
                None
            }
            fn assign_generated_id(&mut self, _id: IdValue) {}
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
/// Sales package: Customer <- ExtCustomer <- VipCustomer extension chain,
/// plus Order/OrderLine relations targeting the base Customer.
///

#[derive(Debug, Default)]
pub struct Customer {
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
}

pub static CUSTOMER: EntityDef = EntityDef {
    ident: "Customer",
    name: "test_Customer",
    type_path: "fixtures::Customer",
    parent: None,
    extends: None,
    id_kind: IdKind::Long,
    fields: FieldList {
        fields: &[
            FieldDef {
                ident: "name",
                kind: FieldKind::Primitive(Primitive::Text),
            },
            FieldDef {
                ident: "email",
                kind: FieldKind::Primitive(Primitive::Text),
            },
        ],
    },
    markers: Markers {
        name_pattern: Some("%s|name"),
        track_edit_history: Some(true),
        ..Markers::NONE
    },
    hooks: &[],
    ctor: || Box::new(Customer::default()),
};

impl_fixture_entity!(Customer, &CUSTOMER, long);

#[derive(Debug, Default)]
pub struct ExtCustomer {
    pub id: Option<i64>,
    pub loyalty: i64,
}

pub static EXT_CUSTOMER: EntityDef = EntityDef {
    ident: "ExtCustomer",
    name: "test_ExtCustomer",
    type_path: "fixtures::ExtCustomer",
    parent: Some(&CUSTOMER),
    extends: Some(&CUSTOMER),
    id_kind: IdKind::Long,
    fields: FieldList {
        fields: &[FieldDef {
            ident: "loyalty",
            kind: FieldKind::Primitive(Primitive::Long),
        }],
    },
    markers: Markers::NONE,
    hooks: &[],
    ctor: || Box::new(ExtCustomer::default()),
};

impl_fixture_entity!(ExtCustomer, &EXT_CUSTOMER, long);

#[derive(Debug, Default)]
pub struct VipCustomer {
    pub id: Option<i64>,
    pub tier: i64,
}

pub static VIP_CUSTOMER: EntityDef = EntityDef {
    ident: "VipCustomer",
    name: "test_VipCustomer",
    type_path: "fixtures::VipCustomer",
    parent: Some(&EXT_CUSTOMER),
    extends: Some(&EXT_CUSTOMER),
    id_kind: IdKind::Long,
    fields: FieldList {
        fields: &[FieldDef {
            ident: "tier",
            kind: FieldKind::Primitive(Primitive::Long),
        }],
    },
    markers: Markers::NONE,
    hooks: &[],
    ctor: || Box::new(VipCustomer::default()),
};

impl_fixture_entity!(VipCustomer, &VIP_CUSTOMER, long);

#[derive(Debug, Default)]
pub struct Order {
    pub id: Option<i64>,
}

pub static ORDER: EntityDef = EntityDef {
    ident: "Order",
    name: "test_Order",
    type_path: "fixtures::Order",
    parent: None,
    extends: None,
    id_kind: IdKind::Long,
    fields: FieldList {
        fields: &[
            FieldDef {
                ident: "customer",
                kind: FieldKind::Relation {
                    target: &CUSTOMER,
                    cardinality: Cardinality::One,
                    ordered: false,
                },
            },
            FieldDef {
                ident: "lines",
                kind: FieldKind::Relation {
                    target: &ORDER_LINE,
                    cardinality: Cardinality::Many,
                    ordered: true,
                },
            },
        ],
    },
    markers: Markers::NONE,
    hooks: &[],
    ctor: || Box::new(Order::default()),
};

impl_fixture_entity!(Order, &ORDER, long);

#[derive(Debug, Default)]
pub struct OrderLine {
    pub id: Option<i64>,
    pub product: String,
}

pub static ORDER_LINE: EntityDef = EntityDef {
    ident: "OrderLine",
    name: "test_OrderLine",
    type_path: "fixtures::OrderLine",
    parent: None,
    extends: None,
    id_kind: IdKind::Long,
    fields: FieldList {
        fields: &[FieldDef {
            ident: "product",
            kind: FieldKind::Primitive(Primitive::Text),
        }],
    },
    markers: Markers::NONE,
    hooks: &[],
    ctor: || Box::new(OrderLine::default()),
};

impl_fixture_entity!(OrderLine, &ORDER_LINE, long);

///
/// Docs package: hook hierarchy, marker propagation, and store tags.
///

#[derive(Debug, Default)]
pub struct BaseDoc {
    pub id: Option<i64>,
    pub log: Vec<String>,
}

#[derive(Debug, Default)]
pub struct MidDoc {
    pub id: Option<i64>,
    pub log: Vec<String>,
}

#[derive(Debug, Default)]
pub struct LeafDoc {
    pub id: Option<i64>,
    pub log: Vec<String>,
}

// Hooks receive the dynamic instance; fixtures record invocations in the
// concrete type's log.
pub fn hook_log(instance: &mut dyn EntityInstance) -> Option<&mut Vec<String>> {
    let any = instance.as_any_mut();
    if any.is::<LeafDoc>() {
        return any.downcast_mut::<LeafDoc>().map(|doc| &mut doc.log);
    }
    if any.is::<MidDoc>() {
        return any.downcast_mut::<MidDoc>().map(|doc| &mut doc.log);
    }
    any.downcast_mut::<BaseDoc>().map(|doc| &mut doc.log)
}

fn record(instance: &mut dyn EntityInstance, entry: &str) -> Result<(), HookError> {
    hook_log(instance)
        .ok_or_else(|| HookError::new("fixture instance has no hook log"))?
        .push(entry.to_string());
    Ok(())
}

pub static BASE_DOC: EntityDef = EntityDef {
    ident: "BaseDoc",
    name: "test_BaseDoc",
    type_path: "fixtures::BaseDoc",
    parent: None,
    extends: None,
    id_kind: IdKind::Long,
    fields: FieldList::EMPTY,
    markers: Markers::NONE,
    hooks: &[PostConstruct {
        name: "stamp",
        invoke: |instance| record(instance, "stamp:base"),
    }],
    ctor: || Box::new(BaseDoc::default()),
};

impl_fixture_entity!(BaseDoc, &BASE_DOC, long);

pub static MID_DOC: EntityDef = EntityDef {
    ident: "MidDoc",
    name: "test_MidDoc",
    type_path: "fixtures::MidDoc",
    parent: Some(&BASE_DOC),
    extends: None,
    id_kind: IdKind::Long,
    fields: FieldList::EMPTY,
    markers: Markers::NONE,
    hooks: &[
        PostConstruct {
            name: "stamp",
            invoke: |instance| record(instance, "stamp:mid"),
        },
        PostConstruct {
            name: "number",
            invoke: |instance| record(instance, "number:mid"),
        },
    ],
    ctor: || Box::new(MidDoc::default()),
};

impl_fixture_entity!(MidDoc, &MID_DOC, long);

pub static LEAF_DOC: EntityDef = EntityDef {
    ident: "LeafDoc",
    name: "test_LeafDoc",
    type_path: "fixtures::LeafDoc",
    parent: Some(&MID_DOC),
    extends: None,
    id_kind: IdKind::Long,
    fields: FieldList::EMPTY,
    markers: Markers::NONE,
    hooks: &[],
    ctor: || Box::new(LeafDoc::default()),
};

impl_fixture_entity!(LeafDoc, &LEAF_DOC, long);

#[derive(Debug, Default)]
pub struct ArchiveEntry {
    pub id: Option<i64>,
}

pub static ARCHIVE_ENTRY: EntityDef = EntityDef {
    ident: "ArchiveEntry",
    name: "test_ArchiveEntry",
    type_path: "fixtures::ArchiveEntry",
    parent: None,
    extends: None,
    id_kind: IdKind::Long,
    fields: FieldList::EMPTY,
    markers: Markers::NONE,
    hooks: &[],
    ctor: || Box::new(ArchiveEntry::default()),
};

impl_fixture_entity!(ArchiveEntry, &ARCHIVE_ENTRY, long);

#[derive(Debug, Default)]
pub struct Counter {
    pub id: Option<i32>,
}

pub static COUNTER: EntityDef = EntityDef {
    ident: "Counter",
    name: "test_Counter",
    type_path: "fixtures::Counter",
    parent: None,
    extends: None,
    id_kind: IdKind::Integer,
    fields: FieldList::EMPTY,
    markers: Markers::NONE,
    hooks: &[],
    ctor: || Box::new(Counter::default()),
};

impl_fixture_entity!(Counter, &COUNTER, int);

#[derive(Debug, Default)]
pub struct Profile {}

pub static PROFILE: EntityDef = EntityDef {
    ident: "Profile",
    name: "test_Profile",
    type_path: "fixtures::Profile",
    parent: None,
    extends: None,
    id_kind: IdKind::Uuid,
    fields: FieldList::EMPTY,
    markers: Markers::NONE,
    hooks: &[],
    ctor: || Box::new(Profile::default()),
};

impl_fixture_entity!(Profile, &PROFILE, none);

#[derive(Debug, Default)]
pub struct SystemConfig {
    pub id: Option<i64>,
}

pub static SYSTEM_CONFIG: EntityDef = EntityDef {
    ident: "SystemConfig",
    name: "test_SystemConfig",
    type_path: "fixtures::SystemConfig",
    parent: None,
    extends: None,
    id_kind: IdKind::Long,
    fields: FieldList::EMPTY,
    markers: Markers {
        system_level: Some(true),
        ..Markers::NONE
    },
    hooks: &[],
    ctor: || Box::new(SystemConfig::default()),
};

impl_fixture_entity!(SystemConfig, &SYSTEM_CONFIG, long);

#[derive(Debug, Default)]
pub struct UserConfig {
    pub id: Option<i64>,
}

pub static USER_CONFIG: EntityDef = EntityDef {
    ident: "UserConfig",
    name: "test_UserConfig",
    type_path: "fixtures::UserConfig",
    parent: Some(&SYSTEM_CONFIG),
    extends: None,
    id_kind: IdKind::Long,
    fields: FieldList::EMPTY,
    markers: Markers::NONE,
    hooks: &[],
    ctor: || Box::new(UserConfig::default()),
};

impl_fixture_entity!(UserConfig, &USER_CONFIG, long);

///
/// Assembly helpers
///

pub fn sales_package() -> EntityPackage {
    EntityPackage::new(
        "sales",
        vec![
            EntityClassInfo::main(&CUSTOMER),
            EntityClassInfo::main(&EXT_CUSTOMER),
            EntityClassInfo::main(&VIP_CUSTOMER),
            EntityClassInfo::main(&ORDER),
            EntityClassInfo::main(&ORDER_LINE),
        ],
    )
}

pub fn docs_package() -> EntityPackage {
    EntityPackage::new(
        "docs",
        vec![
            EntityClassInfo::main(&BASE_DOC),
            EntityClassInfo::main(&MID_DOC),
            EntityClassInfo::main(&LEAF_DOC),
            EntityClassInfo::in_store(&ARCHIVE_ENTRY, "archive"),
            EntityClassInfo::main(&COUNTER),
            EntityClassInfo::main(&PROFILE),
            EntityClassInfo::main(&SYSTEM_CONFIG),
            EntityClassInfo::main(&USER_CONFIG),
        ],
    )
}

pub fn builder() -> MetadataBuilder {
    Metadata::builder()
        .package(sales_package())
        .package(docs_package())
        .stores(Stores::new(vec!["archive".to_string()]))
}

pub fn metadata() -> Metadata {
    builder().build()
}
