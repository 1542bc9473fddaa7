//! Declarative field schemas derived from record types.
//!
//! Build a schema with [`StructSchema::of`], adjust it through
//! [`CustomizableSchema`] handles, then [`freeze`](StructSchema::freeze) it
//! before handing it to concurrent readers.

pub mod builder;
pub mod customizable;
pub mod field_def;
pub mod path;

pub use builder::{FrozenSchema, SchemaRecord, SchemaType, StructSchema};
pub use customizable::{CustomizableSchema, RecordCustomizer};
pub use field_def::{
    DiffSuppressor, FieldDescriptor, FieldKind, FieldTag, RecordSchema, ScalarType, Validator,
};
pub use path::{DescriptorShape, INDEX_PLACEHOLDER, PathContext};
