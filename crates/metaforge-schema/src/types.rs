use derive_more::{Display, FromStr};
use serde::{Deserialize, Serialize};

///
/// Cardinality
///

#[derive(
    Clone, Copy, Default, Debug, Deserialize, Display, Eq, FromStr, PartialEq, Serialize,
)]
pub enum Cardinality {
    #[default]
    One,
    Many,
}

///
/// Primitive
///
/// Scalar datatypes a property range can carry. Relations and enumerations
/// are modelled separately on the field kind.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, PartialEq, Serialize)]
#[remain::sorted]
pub enum Primitive {
    Bool,
    Bytes,
    Date,
    DateTime,
    Decimal,
    Double,
    Int,
    Long,
    Text,
    Time,
    Uuid,
}

impl Primitive {
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Decimal | Self::Double | Self::Int | Self::Long)
    }

    #[must_use]
    pub const fn is_temporal(self) -> bool {
        matches!(self, Self::Date | Self::DateTime | Self::Time)
    }

    #[must_use]
    pub const fn supports_ord(self) -> bool {
        !matches!(self, Self::Bool | Self::Bytes)
    }
}

///
/// IdKind
///
/// Identifier scheme of an entity. Only `Integer` and `Long` are generated
/// numeric kinds eligible for id assignment at creation time.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, PartialEq, Serialize)]
#[remain::sorted]
pub enum IdKind {
    /// Identifier set by application code before persistence.
    Assigned,
    Integer,
    Long,
    /// No identifier at all (embeddable or transient shapes).
    None,
    Uuid,
}

impl IdKind {
    #[must_use]
    pub const fn is_generated_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Long)
    }

    #[must_use]
    pub const fn has_identifier(self) -> bool {
        !matches!(self, Self::None)
    }
}
