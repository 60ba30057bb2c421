//! # Wire Values
//!
//! The protocol engine hands the object layer loosely typed data items and expects the same
//! shape back. [`WireCodec`] is the bridge between those items and the typed payloads:
//!
//! | kind     | encodes as            | decodes from                                  |
//! |----------|-----------------------|-----------------------------------------------|
//! | `i32`    | `Integer` (widened)   | `Integer` in `i32` range, decimal text        |
//! | `bool`   | `Boolean`             | `Boolean`, text `0`/`1`/`false`/`true`        |
//! | `f32`    | `Float`               | `Float`, `Integer`, decimal text              |
//! | `f64`    | `Float`               | `Float`, `Integer`, decimal text              |
//! | `String` | `String` bytes        | `String` bytes up to the first NUL, as UTF-8  |

/// A value as it crosses the protocol boundary.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum WireValue {
    /// Placeholder in a read request, filled in by the object.
    #[default]
    Unset,
    Integer(i64),
    Boolean(bool),
    Float(f64),
    String(Vec<u8>),
    Multiple(Vec<DataItem>),
}

impl WireValue {
    pub fn text(value: &str) -> Self {
        WireValue::String(value.as_bytes().to_vec())
    }
}

/// One `(id, value)` pair of a request or response.
#[derive(Debug, Clone, PartialEq)]
pub struct DataItem {
    pub id: u16,
    pub value: WireValue,
}

impl DataItem {
    pub fn new(id: u16, value: WireValue) -> Self {
        Self { id, value }
    }

    pub fn unset(id: u16) -> Self {
        Self::new(id, WireValue::Unset)
    }
}

/// Conversion between a scalar payload and its wire form.
pub trait WireCodec: Sized {
    fn encode(&self) -> WireValue;

    /// Returns `None` when the wire value cannot represent `Self`.
    fn decode(wire: &WireValue) -> Option<Self>;
}

fn text(bytes: &[u8]) -> Option<&str> {
    let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
    std::str::from_utf8(&bytes[..end]).ok()
}

impl WireCodec for i32 {
    fn encode(&self) -> WireValue {
        WireValue::Integer(i64::from(*self))
    }

    fn decode(wire: &WireValue) -> Option<Self> {
        match wire {
            WireValue::Integer(value) => i32::try_from(*value).ok(),
            WireValue::String(bytes) => text(bytes)?.trim().parse().ok(),
            _ => None,
        }
    }
}

impl WireCodec for bool {
    fn encode(&self) -> WireValue {
        WireValue::Boolean(*self)
    }

    fn decode(wire: &WireValue) -> Option<Self> {
        match wire {
            WireValue::Boolean(value) => Some(*value),
            WireValue::String(bytes) => match text(bytes)?.trim() {
                "1" | "true" => Some(true),
                "0" | "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }
}

impl WireCodec for f32 {
    fn encode(&self) -> WireValue {
        WireValue::Float(f64::from(*self))
    }

    fn decode(wire: &WireValue) -> Option<Self> {
        // Out-of-range magnitudes saturate to infinity rather than failing.
        f64::decode(wire).map(|value| value as f32)
    }
}

impl WireCodec for f64 {
    fn encode(&self) -> WireValue {
        WireValue::Float(*self)
    }

    fn decode(wire: &WireValue) -> Option<Self> {
        match wire {
            WireValue::Float(value) => Some(*value),
            WireValue::Integer(value) => Some(*value as f64),
            WireValue::String(bytes) => text(bytes)?.trim().parse().ok(),
            _ => None,
        }
    }
}

impl WireCodec for String {
    fn encode(&self) -> WireValue {
        let bytes = self.as_bytes();
        let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
        WireValue::String(bytes[..end].to_vec())
    }

    fn decode(wire: &WireValue) -> Option<Self> {
        match wire {
            WireValue::String(bytes) => text(bytes).map(str::to_owned),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_accepts_wide_values_in_range() {
        assert_eq!(i32::decode(&WireValue::Integer(-42)), Some(-42));
        assert_eq!(i32::decode(&WireValue::Integer(i64::from(i32::MAX))), Some(i32::MAX));
        assert_eq!(i32::decode(&WireValue::Integer(i64::from(i32::MAX) + 1)), None);
        assert_eq!(i32::decode(&WireValue::text("  17 ")), Some(17));
        assert_eq!(i32::decode(&WireValue::Float(1.0)), None);
        assert_eq!(7i32.encode(), WireValue::Integer(7));
    }

    #[test]
    fn floats_travel_as_double() {
        assert_eq!(1.5f32.encode(), WireValue::Float(1.5));
        assert_eq!(f32::decode(&WireValue::Float(2.25)), Some(2.25));
        assert_eq!(f64::decode(&WireValue::Integer(3)), Some(3.0));
        assert_eq!(f64::decode(&WireValue::Boolean(true)), None);
    }

    #[test]
    fn oversized_float_saturates_instead_of_failing() {
        assert_eq!(f32::decode(&WireValue::Float(1e300)), Some(f32::INFINITY));
        assert_eq!(f32::decode(&WireValue::Float(-1e300)), Some(f32::NEG_INFINITY));
    }

    #[test]
    fn booleans_accept_textual_forms() {
        assert_eq!(bool::decode(&WireValue::Boolean(true)), Some(true));
        assert_eq!(bool::decode(&WireValue::text("0")), Some(false));
        assert_eq!(bool::decode(&WireValue::text("true")), Some(true));
        assert_eq!(bool::decode(&WireValue::text("yes")), None);
    }

    #[test]
    fn strings_stop_at_nul() {
        let wire = WireValue::String(b"Europe\0garbage".to_vec());
        assert_eq!(String::decode(&wire), Some("Europe".to_string()));
        assert_eq!("a\0b".to_string().encode(), WireValue::String(b"a".to_vec()));
        assert_eq!(String::decode(&WireValue::String(vec![0xff, 0xfe])), None);
        assert_eq!(String::decode(&WireValue::Integer(1)), None);
    }
}
