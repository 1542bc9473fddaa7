//! Module for field descriptors
//!
//! This module provides the schema unit, its function-valued hooks, the field
//! tag language and the `string_enum!` macro.

pub mod field;
pub mod hooks;
mod macros;
pub mod tag;

pub use field::{FieldDescriptor, FieldKind, RecordSchema, ScalarType};
pub use hooks::{DiffSuppressor, Validator};
pub use tag::{FieldTag, SKIP_SENTINEL};
