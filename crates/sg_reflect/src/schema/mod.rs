//! Type descriptors: registration tables describing runtime types.

mod builder;
mod member;

pub use builder::TypeSchemaBuilder;
pub use member::{FieldSpec, LookupError, MemberFault, MethodSpec, Visibility};

pub(crate) use member::MemberFn;

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

// -----------------------------------------------------------------------------
// TypeSchema

/// An opaque descriptor for one dynamically registered runtime type.
///
/// A schema is the registration-table equivalent of a runtime class: the
/// collaborator that loads a type builds its schema once (see
/// [`TypeSchema::builder`]) and attaches the same `Arc` to every instance
/// of that type. Identity *is* the allocation — caches key on the `Arc`'s
/// address and hold it weakly, so dropping the last external `Arc` makes
/// the type reclaimable no matter what has been memoized about it.
///
/// A schema may extend a parent schema, modeling a supertype chain. Member
/// lookup comes in two flavors mirroring a runtime's member search:
///
/// - *public* search ([`public_method`](TypeSchema::public_method),
///   [`public_field`](TypeSchema::public_field)): walks the chain from the
///   nearest enclosing type outward and matches public members only;
/// - *declared* search ([`declared_method`](TypeSchema::declared_method),
///   [`declared_field`](TypeSchema::declared_field)): consults only this
///   type's own table, at any visibility.
///
/// Guarded members (see [`TypeSchemaBuilder::guard`]) deny both searches
/// with [`LookupError::Denied`] rather than reporting not-found.
pub struct TypeSchema {
    path: String,
    parent: Option<Arc<TypeSchema>>,
    methods: FxHashMap<String, Arc<MethodSpec>>,
    fields: FxHashMap<String, Arc<FieldSpec>>,
}

impl TypeSchema {
    /// Starts a builder for a type named `path`.
    pub fn builder(path: impl Into<String>) -> TypeSchemaBuilder {
        TypeSchemaBuilder::new(path.into())
    }

    pub(crate) fn new(
        path: String,
        parent: Option<Arc<TypeSchema>>,
        methods: FxHashMap<String, Arc<MethodSpec>>,
        fields: FxHashMap<String, Arc<FieldSpec>>,
    ) -> Self {
        Self {
            path,
            parent,
            methods,
            fields,
        }
    }

    /// The full type path, e.g. `"demo::Request"`.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The parent schema, if this type extends one.
    #[inline]
    pub fn parent(&self) -> Option<&Arc<TypeSchema>> {
        self.parent.as_ref()
    }

    /// Public method search: nearest enclosing type with a public method of
    /// this name wins. A private member on the way does not shadow an
    /// ancestor's public one.
    pub fn public_method(&self, name: &str) -> Result<Arc<MethodSpec>, LookupError> {
        let mut schema = self;
        loop {
            if let Some(method) = schema.methods.get(name) {
                if method.visibility == Visibility::Public {
                    return if method.guarded {
                        Err(LookupError::Denied)
                    } else {
                        Ok(Arc::clone(method))
                    };
                }
            }
            match schema.parent.as_deref() {
                Some(parent) => schema = parent,
                None => return Err(LookupError::NotFound),
            }
        }
    }

    /// Declared method search: this type's own table, any visibility.
    pub fn declared_method(&self, name: &str) -> Result<Arc<MethodSpec>, LookupError> {
        match self.methods.get(name) {
            Some(method) if method.guarded => Err(LookupError::Denied),
            Some(method) => Ok(Arc::clone(method)),
            None => Err(LookupError::NotFound),
        }
    }

    /// Public field search; same chain walk as [`public_method`].
    ///
    /// [`public_method`]: TypeSchema::public_method
    pub fn public_field(&self, name: &str) -> Result<Arc<FieldSpec>, LookupError> {
        let mut schema = self;
        loop {
            if let Some(field) = schema.fields.get(name) {
                if field.visibility == Visibility::Public {
                    return if field.guarded {
                        Err(LookupError::Denied)
                    } else {
                        Ok(Arc::clone(field))
                    };
                }
            }
            match schema.parent.as_deref() {
                Some(parent) => schema = parent,
                None => return Err(LookupError::NotFound),
            }
        }
    }

    /// Declared field search: this type's own table, any visibility.
    pub fn declared_field(&self, name: &str) -> Result<Arc<FieldSpec>, LookupError> {
        match self.fields.get(name) {
            Some(field) if field.guarded => Err(LookupError::Denied),
            Some(field) => Ok(Arc::clone(field)),
            None => Err(LookupError::NotFound),
        }
    }
}

impl fmt::Debug for TypeSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeSchema")
            .field("path", &self.path)
            .field("parent", &self.parent.as_deref().map(TypeSchema::path))
            .field("methods", &self.methods.len())
            .field("fields", &self.fields.len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    struct Nothing;
    impl crate::instance::Instance for Nothing {
        fn schema(&self) -> Arc<TypeSchema> {
            unreachable!("lookup tests never read members")
        }
        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
    }

    fn schema(path: &str) -> TypeSchemaBuilder {
        TypeSchema::builder(path)
    }

    #[test]
    fn public_search_walks_the_chain() {
        let base = schema("demo::Base")
            .getter("getId", Visibility::Public, |_: &Nothing| {
                Ok(Value::Int(1))
            })
            .build();
        let child = schema("demo::Child").extends(Arc::clone(&base)).build();

        let found = child.public_method("getId").unwrap();
        assert_eq!(found.name(), "getId");
        assert_eq!(
            child.declared_method("getId").unwrap_err(),
            LookupError::NotFound
        );
    }

    #[test]
    fn private_member_does_not_shadow_inherited_public() {
        let base = schema("demo::Base")
            .field("count", Visibility::Public, |_: &Nothing| {
                Ok(Value::Int(10))
            })
            .build();
        let child = schema("demo::Child")
            .extends(Arc::clone(&base))
            .field("count", Visibility::Private, |_: &Nothing| {
                Ok(Value::Int(99))
            })
            .build();

        let public = child.public_field("count").unwrap();
        assert_eq!(public.read(&Nothing).unwrap(), Value::Int(10));

        // The declared search still sees the child's own private field.
        let declared = child.declared_field("count").unwrap();
        assert_eq!(declared.read(&Nothing).unwrap(), Value::Int(99));
    }

    #[test]
    fn nearest_enclosing_public_field_wins() {
        let grandparent = schema("demo::A")
            .field("x", Visibility::Public, |_: &Nothing| Ok(Value::Int(1)))
            .build();
        let parent = schema("demo::B")
            .extends(grandparent)
            .field("x", Visibility::Public, |_: &Nothing| Ok(Value::Int(2)))
            .build();
        let child = schema("demo::C").extends(parent).build();

        let found = child.public_field("x").unwrap();
        assert_eq!(found.read(&Nothing).unwrap(), Value::Int(2));
    }

    #[test]
    fn guarded_members_deny_lookup() {
        let ty = schema("demo::Vault")
            .getter("getSecret", Visibility::Public, |_: &Nothing| {
                Ok(Value::Null)
            })
            .field("secret", Visibility::Private, |_: &Nothing| Ok(Value::Null))
            .guard("getSecret")
            .guard("secret")
            .build();

        assert_eq!(
            ty.public_method("getSecret").unwrap_err(),
            LookupError::Denied
        );
        assert_eq!(
            ty.declared_method("getSecret").unwrap_err(),
            LookupError::Denied
        );
        assert_eq!(
            ty.declared_field("secret").unwrap_err(),
            LookupError::Denied
        );
    }

    #[test]
    fn wrong_receiver_is_a_fault() {
        struct Other;
        impl crate::instance::Instance for Other {
            fn schema(&self) -> Arc<TypeSchema> {
                unreachable!()
            }
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
        }

        let ty = schema("demo::Typed")
            .getter("getId", Visibility::Public, |_: &Nothing| {
                Ok(Value::Int(1))
            })
            .build();
        let method = ty.public_method("getId").unwrap();
        assert_eq!(method.invoke(&Other), Err(MemberFault::WrongReceiver));
    }

    #[test]
    fn non_zero_arity_cannot_be_invoked() {
        let ty = schema("demo::Api")
            .method("lookup", Visibility::Public, 2, |_: &Nothing| {
                Ok(Value::Null)
            })
            .build();
        let method = ty.declared_method("lookup").unwrap();
        assert_eq!(method.invoke(&Nothing), Err(MemberFault::ArityMismatch));
    }
}
