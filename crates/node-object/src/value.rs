//! # Values & Kinds
//!
//! A resource payload is a closed sum over the supported scalar kinds plus the nested
//! multiple-instance map. Typed access goes through [`ResourceKind`], a sealed trait
//! implemented for exactly `i32`, `bool`, `f32`, `f64` and `String`, so a `read::<u8>()`
//! does not compile and a `read::<bool>()` on an integer resource fails at runtime with
//! a type mismatch instead of coercing.

use crate::resource::Resource;
use crate::wire::WireCodec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Runtime kind tag of a resource payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Integer,
    Boolean,
    Float,
    Double,
    String,
    Multiple,
}

impl Kind {
    /// Scalar kinds in the order the object layer tries them.
    pub const SCALARS: [Kind; 5] = [
        Kind::Integer,
        Kind::Boolean,
        Kind::Float,
        Kind::Double,
        Kind::String,
    ];
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Integer => "integer",
            Kind::Boolean => "boolean",
            Kind::Float => "float",
            Kind::Double => "double",
            Kind::String => "string",
            Kind::Multiple => "multiple instances",
        };
        f.write_str(name)
    }
}

/// A stored payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i32),
    Boolean(bool),
    Float(f32),
    Double(f64),
    Text(String),
    Multiple(BTreeMap<u16, Resource>),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Integer(_) => Kind::Integer,
            Value::Boolean(_) => Kind::Boolean,
            Value::Float(_) => Kind::Float,
            Value::Double(_) => Kind::Double,
            Value::Text(_) => Kind::String,
            Value::Multiple(_) => Kind::Multiple,
        }
    }
}

mod sealed {
    pub trait Sealed {}
}

/// A scalar type a resource can hold.
pub trait ResourceKind: sealed::Sealed + WireCodec + Clone + Send + Sync + 'static {
    const KIND: Kind;

    fn into_value(self) -> Value;

    fn from_value(value: &Value) -> Option<&Self>;
}

macro_rules! resource_kind {
    ($($ty:ty => $variant:ident, $kind:ident;)*) => {
        $(
            impl sealed::Sealed for $ty {}

            impl ResourceKind for $ty {
                const KIND: Kind = Kind::$kind;

                fn into_value(self) -> Value {
                    Value::$variant(self)
                }

                fn from_value(value: &Value) -> Option<&Self> {
                    match value {
                        Value::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

resource_kind! {
    i32 => Integer, Integer;
    bool => Boolean, Boolean;
    f32 => Float, Float;
    f64 => Double, Double;
    String => Text, String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tags_follow_payload() {
        assert_eq!(Value::from(7).kind(), Kind::Integer);
        assert_eq!(Value::from(true).kind(), Kind::Boolean);
        assert_eq!(Value::from(1.5f32).kind(), Kind::Float);
        assert_eq!(Value::from(1.5f64).kind(), Kind::Double);
        assert_eq!(Value::from("x".to_string()).kind(), Kind::String);
        assert_eq!(Value::Multiple(BTreeMap::new()).kind(), Kind::Multiple);
    }

    #[test]
    fn typed_extraction_never_coerces() {
        let value = Value::from(3);
        assert_eq!(i32::from_value(&value), Some(&3));
        assert_eq!(f64::from_value(&value), None);
        assert_eq!(bool::from_value(&value), None);
    }

    #[test]
    fn kind_serializes_as_snake_case() {
        let json = serde_json::to_string(&Kind::Multiple).unwrap();
        assert_eq!(json, "\"multiple\"");
    }
}
