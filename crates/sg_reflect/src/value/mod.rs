//! The dynamic value model flowing through resolved object graphs.

mod map;

pub use map::ValueMap;

use std::fmt;
use std::sync::Arc;

use crate::instance::Instance;

// -----------------------------------------------------------------------------
// Value

/// A dynamically typed value extracted from (or making up) an object graph.
///
/// Values are cheap to clone: containers and objects are shared behind
/// [`Arc`]s, and the resolver never mutates what it walks.
///
/// Two variants matter to path resolution:
///
/// - [`Value::Map`] is the string-keyed, map-like container; a path segment
///   advances through it by direct key lookup.
/// - [`Value::Object`] is a schema-backed instance; a path segment advances
///   through it via a resolved accessor.
///
/// Everything else is a scalar leaf. Resolving a further segment against a
/// scalar yields null, not an error: dynamic paths that do not apply to a
/// value are an expected outcome.
#[derive(Clone)]
pub enum Value {
    /// The absent value; also produced by null-returning members.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Arc<str>),
    /// A string-keyed container, resolved by direct key lookup.
    Map(Arc<ValueMap>),
    /// A schema-backed instance, resolved through its accessors.
    Object(Arc<dyn Instance>),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

// Objects compare by identity: the value model has no deep-equality
// contract for opaque instances.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Value::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Value::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Value::Str(v) => f.debug_tuple("Str").field(v).finish(),
            Value::Map(v) => f.debug_tuple("Map").field(v).finish(),
            Value::Object(v) => write!(f, "Object({})", v.schema().path()),
        }
    }
}

/// Renders the value the way an instrumentation layer reports captured
/// values: scalars verbatim, objects by their type path.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(v) => fmt::Display::fmt(v, f),
            Value::Int(v) => fmt::Display::fmt(v, f),
            Value::Float(v) => fmt::Display::fmt(v, f),
            Value::Str(v) => f.write_str(v),
            Value::Map(v) => fmt::Debug::fmt(v, f),
            Value::Object(v) => f.write_str(v.schema().path()),
        }
    }
}

// -----------------------------------------------------------------------------
// Conversions

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    #[inline]
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    #[inline]
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Value::Str(Arc::from(value))
    }
}

impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Value::Str(Arc::from(value))
    }
}

impl From<ValueMap> for Value {
    #[inline]
    fn from(value: ValueMap) -> Self {
        Value::Map(Arc::new(value))
    }
}

impl<T: Instance> From<Arc<T>> for Value {
    #[inline]
    fn from(value: Arc<T>) -> Self {
        Value::Object(value)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_equality() {
        assert_eq!(Value::from(7), Value::Int(7));
        assert_eq!(Value::from("hi"), Value::from("hi".to_owned()));
        assert_ne!(Value::from(1), Value::from(1.0));
        assert!(Value::Null.is_null());
    }

    #[test]
    fn display_rendering() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::from("text/plain").to_string(), "text/plain");
    }
}
