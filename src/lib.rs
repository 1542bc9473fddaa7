//! Schema derivation, fluent schema customization and tri-state record
//! conversion.
//!
//! Configuration-model records are plain structs whose leaves are
//! [`Tri`] values. `#[derive(Record)]` makes such a struct a schema source
//! and pairs it with a domain-model struct for conversion.

extern crate self as schema_bridge;

pub mod common;
pub mod config;
pub mod convert;
pub mod error;
pub mod schema;

#[doc(hidden)]
pub mod __private {
    pub use serde;
}

pub use schema_bridge_macros::Record;

// Core types
pub use common::{Scalar, Tri};
pub use config::ConverterConfig;
pub use error::{ConversionError, EnumValueError, Result, SchemaDefect};

// Schema
pub use schema::{
    CustomizableSchema, FieldDescriptor, FieldKind, FrozenSchema, PathContext, RecordCustomizer,
    StructSchema,
};

// Conversion
pub use convert::{
    ConversionContext, to_config, to_config_batch, to_config_into, to_domain, to_domain_batch,
    to_domain_into,
};
