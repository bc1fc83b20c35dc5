//! Builder assembling a type's registration table.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::instance::Instance;
use crate::schema::{FieldSpec, MemberFault, MemberFn, MethodSpec, TypeSchema, Visibility};
use crate::value::Value;

/// Builds a [`TypeSchema`].
///
/// One builder per type, driven by the collaborator that loads the type.
/// Registering the same member name twice replaces the earlier entry; the
/// last registration wins.
///
/// Member bodies are typed closures over the concrete type: the builder
/// wraps them so that a receiver of any other type surfaces as
/// [`MemberFault::WrongReceiver`] instead of a panic.
///
/// # Examples
///
/// See the crate-level docs for a complete registration.
pub struct TypeSchemaBuilder {
    path: String,
    parent: Option<Arc<TypeSchema>>,
    methods: FxHashMap<String, MethodSpec>,
    fields: FxHashMap<String, FieldSpec>,
}

impl TypeSchemaBuilder {
    pub(crate) fn new(path: String) -> Self {
        Self {
            path,
            parent: None,
            methods: FxHashMap::default(),
            fields: FxHashMap::default(),
        }
    }

    /// Declares a parent schema, modeling a supertype chain.
    pub fn extends(mut self, parent: Arc<TypeSchema>) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Registers a zero-argument, getter-like method.
    pub fn getter<T, F>(self, name: impl Into<String>, visibility: Visibility, body: F) -> Self
    where
        T: Instance,
        F: Fn(&T) -> Result<Value, MemberFault> + Send + Sync + 'static,
    {
        self.method(name, visibility, 0, body)
    }

    /// Registers a method with an explicit declared arity.
    ///
    /// Resolution only ever matches zero-arity methods; higher arities exist
    /// so lookups behave like a real member table (a method of the right
    /// name but wrong shape is not a getter).
    pub fn method<T, F>(
        mut self,
        name: impl Into<String>,
        visibility: Visibility,
        arity: usize,
        body: F,
    ) -> Self
    where
        T: Instance,
        F: Fn(&T) -> Result<Value, MemberFault> + Send + Sync + 'static,
    {
        let name = name.into();
        let spec = MethodSpec {
            name: name.clone(),
            visibility,
            arity,
            guarded: false,
            call: typed(body),
        };
        self.methods.insert(name, spec);
        self
    }

    /// Registers a field-like member: a direct state read.
    pub fn field<T, F>(
        mut self,
        name: impl Into<String>,
        visibility: Visibility,
        body: F,
    ) -> Self
    where
        T: Instance,
        F: Fn(&T) -> Result<Value, MemberFault> + Send + Sync + 'static,
    {
        let name = name.into();
        let spec = FieldSpec {
            name: name.clone(),
            visibility,
            guarded: false,
            read: typed(body),
        };
        self.fields.insert(name, spec);
        self
    }

    /// Marks an already registered member (method and/or field of this
    /// name) as guarded: lookups report [`LookupError::Denied`] for it.
    ///
    /// # Panics
    ///
    /// Panics if no member of this name has been registered — guarding
    /// nothing is a registration bug.
    ///
    /// [`LookupError::Denied`]: crate::schema::LookupError::Denied
    pub fn guard(mut self, name: &str) -> Self {
        let mut hit = false;
        if let Some(method) = self.methods.get_mut(name) {
            method.guarded = true;
            hit = true;
        }
        if let Some(field) = self.fields.get_mut(name) {
            field.guarded = true;
            hit = true;
        }
        if !hit {
            panic!(
                "Called `TypeSchemaBuilder::guard` for `{name}`, but `{}` registers no such member",
                self.path,
            );
        }
        self
    }

    /// Finalizes the table.
    pub fn build(self) -> Arc<TypeSchema> {
        let methods = self
            .methods
            .into_iter()
            .map(|(name, spec)| (name, Arc::new(spec)))
            .collect();
        let fields = self
            .fields
            .into_iter()
            .map(|(name, spec)| (name, Arc::new(spec)))
            .collect();
        Arc::new(TypeSchema::new(self.path, self.parent, methods, fields))
    }
}

// Wraps a typed member body, turning a receiver of the wrong concrete type
// into a fault rather than a panic.
fn typed<T, F>(body: F) -> Box<MemberFn>
where
    T: Instance,
    F: Fn(&T) -> Result<Value, MemberFault> + Send + Sync + 'static,
{
    Box::new(move |obj: &dyn Instance| match obj.as_any().downcast_ref::<T>() {
        Some(receiver) => body(receiver),
        None => Err(MemberFault::WrongReceiver),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Nothing;
    impl Instance for Nothing {
        fn schema(&self) -> Arc<TypeSchema> {
            unreachable!()
        }
        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
    }

    #[test]
    fn last_registration_wins() {
        let ty = TypeSchema::builder("demo::Dup")
            .getter("getV", Visibility::Public, |_: &Nothing| Ok(Value::Int(1)))
            .getter("getV", Visibility::Public, |_: &Nothing| Ok(Value::Int(2)))
            .build();
        let method = ty.public_method("getV").unwrap();
        assert_eq!(method.invoke(&Nothing).unwrap(), Value::Int(2));
    }

    #[test]
    #[should_panic(expected = "registers no such member")]
    fn guarding_an_unregistered_member_panics() {
        let _ = TypeSchema::builder("demo::Empty").guard("ghost");
    }
}
