//! Traits shared by the schema builder and the converter.

use crate::schema::field_def::{FieldDescriptor, ScalarType};

/// A value type that a configuration-model [`Tri`](crate::Tri) can wrap.
///
/// Implemented for the four primitive storage types and for every enum
/// declared with [`string_enum!`](crate::string_enum).
pub trait Scalar: Clone + PartialEq + Default + Send + Sync + 'static {
    /// Descriptor for a field holding this scalar
    fn descriptor() -> FieldDescriptor;
}

impl Scalar for bool {
    fn descriptor() -> FieldDescriptor {
        FieldDescriptor::scalar(ScalarType::Bool)
    }
}

impl Scalar for i64 {
    fn descriptor() -> FieldDescriptor {
        FieldDescriptor::scalar(ScalarType::Int)
    }
}

impl Scalar for f64 {
    fn descriptor() -> FieldDescriptor {
        FieldDescriptor::scalar(ScalarType::Float)
    }
}

impl Scalar for String {
    fn descriptor() -> FieldDescriptor {
        FieldDescriptor::scalar(ScalarType::String)
    }
}
