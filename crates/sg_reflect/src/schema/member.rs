//! Member specs: the callable and readable entries of a registration table.

use std::fmt;

use crate::instance::Instance;
use crate::value::Value;

// -----------------------------------------------------------------------------
// Visibility

/// Visibility of a member within its declaring type.
///
/// The public member search only matches `Public`; the declared search
/// matches either.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

// -----------------------------------------------------------------------------
// Errors

/// A failed member lookup on a schema.
///
/// Both outcomes are non-fatal to resolution: the strategy logs them and
/// falls through to its next candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupError {
    /// The type declares no member of this name (or none the search
    /// variant may match).
    NotFound,
    /// The member exists but is guarded against lookup.
    Denied,
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("no such member"),
            Self::Denied => f.write_str("member lookup denied"),
        }
    }
}

impl std::error::Error for LookupError {}

/// A failure raised while reading a member from an instance.
///
/// These surface to callers as the inaccessible marker, never as a panic or
/// a propagated error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberFault {
    /// The runtime denied access to the member at read time.
    Denied,
    /// The underlying member raised; carries its message.
    Raised(String),
    /// The accessor was applied to an instance of a different concrete type.
    WrongReceiver,
    /// The member is not zero-argument and cannot be invoked as a getter.
    ArityMismatch,
}

impl fmt::Display for MemberFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Denied => f.write_str("access to the member was denied"),
            Self::Raised(msg) => write!(f, "member raised: {msg}"),
            Self::WrongReceiver => {
                f.write_str("accessor applied to an instance of a different type")
            }
            Self::ArityMismatch => f.write_str("member does not take zero arguments"),
        }
    }
}

impl std::error::Error for MemberFault {}

// -----------------------------------------------------------------------------
// Member specs

/// Type-erased body of a member: reads one value off one receiver.
pub(crate) type MemberFn = dyn Fn(&dyn Instance) -> Result<Value, MemberFault> + Send + Sync;

/// A callable member of a [`TypeSchema`](crate::schema::TypeSchema).
///
/// Only zero-arity methods are invokable through this spec; higher arities
/// exist so lookups can tell "method of this name exists but is not a
/// getter" apart from "no such method".
pub struct MethodSpec {
    pub(crate) name: String,
    pub(crate) visibility: Visibility,
    pub(crate) arity: usize,
    pub(crate) guarded: bool,
    pub(crate) call: Box<MemberFn>,
}

impl MethodSpec {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Declared parameter count.
    #[inline]
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Invokes the member as a zero-argument call against `obj`.
    pub fn invoke(&self, obj: &dyn Instance) -> Result<Value, MemberFault> {
        if self.arity != 0 {
            return Err(MemberFault::ArityMismatch);
        }
        (self.call)(obj)
    }
}

impl fmt::Debug for MethodSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodSpec")
            .field("name", &self.name)
            .field("visibility", &self.visibility)
            .field("arity", &self.arity)
            .field("guarded", &self.guarded)
            .finish_non_exhaustive()
    }
}

/// A field-like member of a [`TypeSchema`](crate::schema::TypeSchema):
/// a direct state read, no call semantics.
pub struct FieldSpec {
    pub(crate) name: String,
    pub(crate) visibility: Visibility,
    pub(crate) guarded: bool,
    pub(crate) read: Box<MemberFn>,
}

impl FieldSpec {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Reads the field off `obj`.
    pub fn read(&self, obj: &dyn Instance) -> Result<Value, MemberFault> {
        (self.read)(obj)
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("visibility", &self.visibility)
            .field("guarded", &self.guarded)
            .finish_non_exhaustive()
    }
}
