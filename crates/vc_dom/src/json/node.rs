use alloc::string::String;
use alloc::vec::Vec;

use crate::NodeId;

// -----------------------------------------------------------------------------
// JsonNumber

/// Stored representation of a JSON number.
///
/// Integers keep their signedness so that readers can tell whether a
/// literal fits the requested width. Parsed non-negative integers are
/// always [`Unsigned`](JsonNumber::Unsigned).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum JsonNumber {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
}

impl JsonNumber {
    /// Returns `true` for both integer representations.
    #[inline]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Self::Signed(_) | Self::Unsigned(_))
    }

    /// Converts to `f64`, rounding integers beyond 2^53.
    #[inline]
    pub const fn as_f64(&self) -> f64 {
        match *self {
            Self::Signed(v) => v as f64,
            Self::Unsigned(v) => v as f64,
            Self::Float(v) => v,
        }
    }
}

impl From<&serde_json::Number> for JsonNumber {
    fn from(number: &serde_json::Number) -> Self {
        if let Some(v) = number.as_u64() {
            Self::Unsigned(v)
        } else if let Some(v) = number.as_i64() {
            Self::Signed(v)
        } else {
            // `as_f64` only fails for arbitrary precision numbers.
            Self::Float(number.as_f64().unwrap_or(f64::NAN))
        }
    }
}

impl From<JsonNumber> for serde_json::Value {
    fn from(number: JsonNumber) -> Self {
        match number {
            JsonNumber::Signed(v) => serde_json::Value::from(v),
            JsonNumber::Unsigned(v) => serde_json::Value::from(v),
            JsonNumber::Float(v) => serde_json::Number::from_f64(v)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
        }
    }
}

// -----------------------------------------------------------------------------
// JsonNode

/// A node of a [`JsonDocument`](super::JsonDocument).
#[derive(Clone, Debug, Default, PartialEq)]
pub enum JsonNode {
    #[default]
    Null,
    Bool(bool),
    Number(JsonNumber),
    String(String),
    Array(Vec<NodeId>),
    /// Members in insertion order.
    Object(Vec<(String, NodeId)>),
}

impl JsonNode {
    /// An empty array.
    #[inline]
    pub const fn array() -> Self {
        Self::Array(Vec::new())
    }

    /// An empty object.
    #[inline]
    pub const fn object() -> Self {
        Self::Object(Vec::new())
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline]
    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    #[inline]
    pub const fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Returns `true` for arrays and objects.
    #[inline]
    pub const fn is_container(&self) -> bool {
        matches!(self, Self::Array(_) | Self::Object(_))
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    pub fn as_number(&self) -> Option<JsonNumber> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for JsonNode {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<JsonNumber> for JsonNode {
    #[inline]
    fn from(value: JsonNumber) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for JsonNode {
    #[inline]
    fn from(value: i64) -> Self {
        Self::Number(JsonNumber::Signed(value))
    }
}

impl From<u64> for JsonNode {
    #[inline]
    fn from(value: u64) -> Self {
        Self::Number(JsonNumber::Unsigned(value))
    }
}

impl From<f64> for JsonNode {
    #[inline]
    fn from(value: f64) -> Self {
        Self::Number(JsonNumber::Float(value))
    }
}

impl From<&str> for JsonNode {
    #[inline]
    fn from(value: &str) -> Self {
        Self::String(value.into())
    }
}

impl From<String> for JsonNode {
    #[inline]
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

// -----------------------------------------------------------------------------
// Tests
