//! The path walk over dynamic values.

use std::fmt;

use sg_reflect::Value;
use tracing::debug;

use crate::cache::AccessorCache;

/// The marker reported when a property exists but could not be read.
///
/// Distinct from null: null means the path found nothing, this means the
/// path found something the runtime refused to hand over.
pub const INACCESSIBLE: &str = "<could not access>";

// -----------------------------------------------------------------------------
// Resolved

/// Outcome of resolving a path against an object graph.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolved {
    /// The value found at the end of the path.
    Value(Value),
    /// A null intermediate, an absent key or property, or a null leaf.
    Null,
    /// A property that exists but could not be read; rendered as
    /// [`INACCESSIBLE`].
    Inaccessible,
}

impl Resolved {
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Resolved::Null)
    }

    #[inline]
    pub fn is_inaccessible(&self) -> bool {
        matches!(self, Resolved::Inaccessible)
    }

    /// The resolved value, if the walk produced one.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Resolved::Value(value) => Some(value),
            Resolved::Null | Resolved::Inaccessible => None,
        }
    }
}

impl fmt::Display for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolved::Value(value) => fmt::Display::fmt(value, f),
            Resolved::Null => f.write_str("null"),
            Resolved::Inaccessible => f.write_str(INACCESSIBLE),
        }
    }
}

// -----------------------------------------------------------------------------
// The walk

impl AccessorCache {
    /// Resolves `path` segment by segment against `root`.
    ///
    /// The walk keeps a cursor and advances it one segment at a time:
    ///
    /// - a null cursor short-circuits to [`Resolved::Null`]; an exhausted
    ///   path returns the cursor (the empty path is "the object itself");
    /// - a map cursor advances by direct key lookup, absent keys becoming
    ///   null — maps never touch the accessor cache;
    /// - an object cursor advances through the memoized accessor for
    ///   `(its type, segment)`. A type with no such property resolves to
    ///   null (dynamic paths that do not apply are expected); a member
    ///   fault resolves to [`Resolved::Inaccessible`] and abandons the
    ///   remaining segments;
    /// - any other cursor is a scalar with no properties: null.
    pub fn resolve_value<S: AsRef<str>>(&self, root: &Value, path: &[S]) -> Resolved {
        let mut current = root.clone();
        for segment in path {
            let segment = segment.as_ref();
            current = match current {
                Value::Null => return Resolved::Null,
                Value::Map(map) => map.get(segment).cloned().unwrap_or(Value::Null),
                Value::Object(obj) => {
                    let schema = obj.schema();
                    let Some(accessor) = self.accessor(&schema, segment) else {
                        return Resolved::Null;
                    };
                    match accessor.read(obj.as_ref()) {
                        Ok(value) => value,
                        Err(fault) => {
                            debug!(
                                ty = schema.path(),
                                property = segment,
                                %fault,
                                "property read failed",
                            );
                            return Resolved::Inaccessible;
                        }
                    }
                }
                // Scalars have no properties; the path does not apply.
                _ => return Resolved::Null,
            };
        }
        match current {
            Value::Null => Resolved::Null,
            value => Resolved::Value(value),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
