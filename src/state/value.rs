//! Typed values for world-state entries.
//!
//! Every variable tracked by a [`WorldState`](crate::WorldState) is a tagged
//! [`Value`]. The tag travels with the payload and every operation in the
//! engine (hashing, comparison, distance, mutation) dispatches on it with an
//! exhaustive match, so adding a variant is a compile-time checklist rather
//! than a runtime surprise.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A typed value held by a single world-state entry.
///
/// Two values are equal only when both the tag and the payload match:
/// `Value::Int64(1)` is never equal to `Value::UInt64(1)`.
///
/// # Example
/// ```
/// use athena::Value;
///
/// let health: Value = 100i64.into();
/// let name: Value = "scout".into();
/// assert_eq!(health, Value::Int64(100));
/// assert_eq!(name, Value::String("scout".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Boolean flag, e.g. `has_weapon` or `door_unlocked`.
    Bool(bool),
    /// 8-bit signed integer for small counters.
    Int8(i8),
    /// 64-bit signed integer for discrete quantities such as health or gold.
    Int64(i64),
    /// 8-bit unsigned integer.
    UInt8(u8),
    /// 64-bit unsigned integer.
    UInt64(u64),
    /// 64-bit float for continuous measurements such as distance.
    Float64(f64),
    /// UTF-8 string, e.g. a location or faction name.
    String(String),
}

impl Value {
    /// Returns true for the five numeric variants.
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Value::Bool(_) | Value::String(_))
    }

    /// Name of the carried type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int8(_) => "int8",
            Value::Int64(_) => "int64",
            Value::UInt8(_) => "uint8",
            Value::UInt64(_) => "uint64",
            Value::Float64(_) => "float64",
            Value::String(_) => "string",
        }
    }

    pub(crate) fn same_variant(&self, other: &Value) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Widens a numeric payload to `f64` for heuristic distance math.
    pub(crate) fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int8(v) => Some(f64::from(*v)),
            Value::Int64(v) => Some(*v as f64),
            Value::UInt8(v) => Some(f64::from(*v)),
            Value::UInt64(v) => Some(*v as f64),
            Value::Float64(v) => Some(*v),
            Value::Bool(_) | Value::String(_) => None,
        }
    }

    /// Orders two same-variant numeric values. `None` for mixed tags,
    /// non-numeric tags, or NaN.
    pub(crate) fn numeric_cmp(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Int8(a), Value::Int8(b)) => Some(a.cmp(b)),
            (Value::Int64(a), Value::Int64(b)) => Some(a.cmp(b)),
            (Value::UInt8(a), Value::UInt8(b)) => Some(a.cmp(b)),
            (Value::UInt64(a), Value::UInt64(b)) => Some(a.cmp(b)),
            (Value::Float64(a), Value::Float64(b)) => a.partial_cmp(b),
            _ => None,
        }
    }

    /// Additive identity check, used to detect no-op `ADD`/`SUB` effects.
    pub(crate) fn is_zero(&self) -> bool {
        match self {
            Value::Int8(v) => *v == 0,
            Value::Int64(v) => *v == 0,
            Value::UInt8(v) => *v == 0,
            Value::UInt64(v) => *v == 0,
            Value::Float64(v) => *v == 0.0,
            Value::Bool(_) | Value::String(_) => false,
        }
    }

    /// Multiplicative identity check, used to detect no-op `MUL`/`DIV` effects.
    pub(crate) fn is_one(&self) -> bool {
        match self {
            Value::Int8(v) => *v == 1,
            Value::Int64(v) => *v == 1,
            Value::UInt8(v) => *v == 1,
            Value::UInt64(v) => *v == 1,
            Value::Float64(v) => *v == 1.0,
            Value::Bool(_) | Value::String(_) => false,
        }
    }

    /// Wrapping negation for numeric payloads; non-numeric tags are returned
    /// unchanged (callers gate those out by operator).
    pub(crate) fn negated(&self) -> Value {
        match self {
            Value::Int8(v) => Value::Int8(v.wrapping_neg()),
            Value::Int64(v) => Value::Int64(v.wrapping_neg()),
            Value::UInt8(v) => Value::UInt8(v.wrapping_neg()),
            Value::UInt64(v) => Value::UInt64(v.wrapping_neg()),
            Value::Float64(v) => Value::Float64(-v),
            other => other.clone(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int8(v) => write!(f, "{v}"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::UInt8(v) => write!(f, "{v}"),
            Value::UInt64(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Value::Int8(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Value::UInt8(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::UInt64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}
