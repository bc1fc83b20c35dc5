//! Accessor resolution: decides, once per `(type, name)`, how a named
//! property is extracted from instances of a type.
//!
//! Pure lookup logic — no caching, no shared state. The precedence order
//! is fixed:
//!
//! 1. a zero-argument method `get` + capitalized name,
//! 2. a zero-argument method `is` + capitalized name,
//! 3. a zero-argument method named exactly `name`,
//! 4. a field named exactly `name`.
//!
//! Method and field lookups each try the public search first (which walks
//! the supertype chain) and fall back to the declared search on the type
//! itself. Every miss is non-fatal and logged at trace level; only full
//! exhaustion is reported at debug level.

use std::fmt;
use std::sync::Arc;

use sg_reflect::schema::{FieldSpec, LookupError, MemberFault, MethodSpec, TypeSchema};
use sg_reflect::{Instance, Value};
use tracing::{debug, trace};

// -----------------------------------------------------------------------------
// Accessor

/// A resolved strategy for extracting one named property from instances of
/// one type.
///
/// Stable for the lifetime of the type: accessors are pure functions of
/// `(type, name)` and are never invalidated, only reclaimed along with
/// their type.
#[derive(Clone)]
pub enum Accessor {
    /// A getter-like, zero-argument call.
    Invoke(Arc<MethodSpec>),
    /// A field-like direct read.
    Read(Arc<FieldSpec>),
}

impl Accessor {
    /// Extracts the property value from `obj`.
    pub fn read(&self, obj: &dyn Instance) -> Result<Value, MemberFault> {
        match self {
            Self::Invoke(method) => method.invoke(obj),
            Self::Read(field) => field.read(obj),
        }
    }

    /// Name of the member this accessor is bound to.
    pub fn member_name(&self) -> &str {
        match self {
            Self::Invoke(method) => method.name(),
            Self::Read(field) => field.name(),
        }
    }
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invoke(method) => write!(f, "Invoke({})", method.name()),
            Self::Read(field) => write!(f, "Read({})", field.name()),
        }
    }
}

// -----------------------------------------------------------------------------
// Resolution

/// Resolves an accessor for property `name` on `schema`, without caching.
///
/// Returns `None` when the type has no matching member — callers treat
/// that as "this path does not apply to this type", not as an error.
///
/// # Panics
///
/// Panics if `name` is empty; segmented paths never contain empty names,
/// so an empty name is a caller contract violation.
pub fn find_accessor(schema: &TypeSchema, name: &str) -> Option<Accessor> {
    let capitalized = capitalize(name);
    for candidate in [
        format!("get{capitalized}"),
        format!("is{capitalized}"),
        name.to_owned(),
    ] {
        match zero_arg_method(schema, &candidate) {
            Ok(method) => return Some(Accessor::Invoke(method)),
            Err(err) => {
                trace!(ty = schema.path(), method = %candidate, %err, "method lookup failed");
            }
        }
    }
    match field(schema, name) {
        Ok(field) => return Some(Accessor::Read(field)),
        Err(err) => trace!(ty = schema.path(), field = name, %err, "field lookup failed"),
    }
    debug!(ty = schema.path(), property = name, "no accessor found");
    None
}

// Public search first (the whole chain), then the declared search on the
// type itself. A method that is not zero-argument never matches.
fn zero_arg_method(schema: &TypeSchema, name: &str) -> Result<Arc<MethodSpec>, LookupError> {
    let method = match schema.public_method(name) {
        Ok(method) => method,
        Err(LookupError::Denied) => return Err(LookupError::Denied),
        Err(LookupError::NotFound) => schema.declared_method(name)?,
    };
    if method.arity() == 0 {
        Ok(method)
    } else {
        Err(LookupError::NotFound)
    }
}

fn field(schema: &TypeSchema, name: &str) -> Result<Arc<FieldSpec>, LookupError> {
    match schema.public_field(name) {
        Ok(field) => Ok(field),
        Err(LookupError::Denied) => Err(LookupError::Denied),
        Err(LookupError::NotFound) => schema.declared_field(name),
    }
}

// Upper-cases the first character only; the rest of the name is unchanged.
fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    let first = chars
        .next()
        .expect("property name must not be empty");
    let mut out = String::with_capacity(name.len());
    out.extend(first.to_uppercase());
    out.push_str(chars.as_str());
    out
}

// -----------------------------------------------------------------------------
// Tests
