#![doc = include_str!("../README.md")]

pub mod instance;
pub mod schema;
pub mod value;

pub use instance::Instance;
pub use schema::{
    FieldSpec, LookupError, MemberFault, MethodSpec, TypeSchema, TypeSchemaBuilder, Visibility,
};
pub use value::{Value, ValueMap};
