//! The trait connecting resolvable objects to their runtime type.

use std::any::Any;
use std::sync::Arc;

use crate::schema::TypeSchema;

/// An object whose properties can be resolved dynamically.
///
/// Implemented by the types a collaborator registers at runtime. The
/// contract mirrors an object's runtime class: two instances of the same
/// concrete type must return the same [`TypeSchema`] allocation, since the
/// schema's identity is what accessor caches key on.
///
/// [`as_any`](Instance::as_any) hands member closures their receiver; a
/// typed closure downcasts it back to the concrete type and reports
/// [`MemberFault::WrongReceiver`](crate::schema::MemberFault::WrongReceiver)
/// when handed an instance of some other type.
pub trait Instance: Any + Send + Sync {
    /// Returns the schema describing this object's runtime type.
    fn schema(&self) -> Arc<TypeSchema>;

    /// Returns the receiver for member closures.
    fn as_any(&self) -> &dyn Any;
}
