use std::fmt;

use rustc_hash::FxHashMap;

use crate::value::Value;

/// The string-keyed, map-like container of the value model.
///
/// Path resolution advances through a `ValueMap` by direct key lookup; an
/// absent key resolves to null. Maps never go through the accessor cache.
///
/// # Examples
///
/// ```
/// use sg_reflect::{Value, ValueMap};
///
/// let mut headers = ValueMap::new();
/// headers.insert("contentType", "text/plain");
///
/// assert_eq!(headers.get("contentType"), Some(&Value::from("text/plain")));
/// assert_eq!(headers.get("accept"), None);
/// ```
#[derive(Default, Clone, PartialEq)]
pub struct ValueMap {
    entries: FxHashMap<String, Value>,
}

impl ValueMap {
    /// Creates an empty map.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` under `key`, returning any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Returns the value stored under `key`, if any.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(key, value)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, Value)> for ValueMap {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl fmt::Debug for ValueMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut map = ValueMap::new();
        assert!(map.is_empty());
        assert_eq!(map.insert("a", 1), None);
        assert_eq!(map.insert("a", 2), Some(Value::Int(1)));
        assert_eq!(map.get("a"), Some(&Value::Int(2)));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn nests_into_value() {
        let mut inner = ValueMap::new();
        inner.insert("b", 7);
        let mut outer = ValueMap::new();
        outer.insert("a", inner);

        let Value::Map(outer) = Value::from(outer) else {
            panic!("expected a map value");
        };
        let Some(Value::Map(inner)) = outer.get("a") else {
            panic!("expected a nested map");
        };
        assert_eq!(inner.get("b"), Some(&Value::Int(7)));
    }
}
