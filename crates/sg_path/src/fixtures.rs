//! Test-only instance type shared by the unit tests in this crate.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use sg_reflect::schema::MemberFault;
use sg_reflect::{Instance, TypeSchema, Value};

/// A test instance whose state lives in a plain bag, so each test can shape
/// a schema without declaring a new struct.
pub(crate) struct Probe {
    schema: Arc<TypeSchema>,
    bag: HashMap<String, Value>,
}

impl Probe {
    /// A probe with no state; pairs with [`returns`] getters.
    pub fn bare(schema: &Arc<TypeSchema>) -> Self {
        Self {
            schema: Arc::clone(schema),
            bag: HashMap::new(),
        }
    }

    /// A shared probe whose bag holds `entries`; pairs with [`slot`] getters.
    pub fn with_bag(schema: &Arc<TypeSchema>, entries: Vec<(&str, Value)>) -> Arc<Self> {
        Arc::new(Self {
            schema: Arc::clone(schema),
            bag: entries
                .into_iter()
                .map(|(k, v)| (k.to_owned(), v))
                .collect(),
        })
    }

    pub fn slot(&self, key: &str) -> Value {
        self.bag.get(key).cloned().unwrap_or(Value::Null)
    }
}

impl Instance for Probe {
    fn schema(&self) -> Arc<TypeSchema> {
        Arc::clone(&self.schema)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A member body returning a constant string.
pub(crate) fn returns(
    text: &str,
) -> impl Fn(&Probe) -> Result<Value, MemberFault> + Send + Sync + 'static {
    let text = text.to_owned();
    move |_| Ok(Value::from(text.as_str()))
}

/// A member body reading `key` out of the probe's bag.
pub(crate) fn slot(
    key: &str,
) -> impl Fn(&Probe) -> Result<Value, MemberFault> + Send + Sync + 'static {
    let key = key.to_owned();
    move |probe| Ok(probe.slot(&key))
}

/// A member body that always raises.
pub(crate) fn raises(
    message: &str,
) -> impl Fn(&Probe) -> Result<Value, MemberFault> + Send + Sync + 'static {
    let message = message.to_owned();
    move |_| Err(MemberFault::Raised(message.clone()))
}
