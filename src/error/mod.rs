//! Error handling for schema assembly and record conversion.
//!
//! Two channels are kept apart. [`SchemaDefect`] describes a mistake in the
//! code that assembles a schema; it is never expected at runtime and the
//! fail-fast entry points abort on it. [`ConversionError`] describes a record
//! instance that cannot be mapped and is returned to the caller.

mod util;

pub use util::{fail_fast, join_path};

use crate::schema::FieldKind;

/// A defect in schema assembly code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaDefect {
    /// A path segment does not name a field
    #[error("missing field `{segment}` while resolving schema path `{path}`")]
    MissingPath { path: String, segment: String },

    /// A path continues below a field that has no nested record
    #[error("cannot descend below `{segment}` in schema path `{path}`, not a nested record")]
    NotNested { path: String, segment: String },

    /// A cross-field constraint setter received no names
    #[error("{operation} cannot take in an empty list")]
    EmptyConstraint { operation: &'static str },

    /// Default-based diff suppression on a composite field
    #[error("expected primitive type, got: {kind}")]
    NotPrimitive { kind: FieldKind },

    /// `add_new_field` on something other than a nested record
    #[error("cannot add new field `{name}`, target is not a nested record")]
    NotRecord { name: String },

    /// `add_new_field` with a name that is already taken
    #[error("cannot add new field, `{name}` already exists in the schema")]
    DuplicateField { name: String },

    /// `set_slice_set` on a field that is not a list
    #[error("cannot turn a {kind} field into a set")]
    NotList { kind: FieldKind },

    /// Item bound on a field that is neither a list nor a set
    #[error("cannot bound the items of a {kind} field with `{token}`")]
    NotBounded { token: &'static str, kind: FieldKind },

    /// Field tag token outside the tag language
    #[error("unknown field tag token `{token}`")]
    UnknownTagToken { token: String },

    /// Field tag token with a malformed argument
    #[error("invalid argument `{argument}` for field tag token `{token}`")]
    InvalidTagArgument { token: String, argument: String },
}

/// A record instance that could not be converted.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// A numeric value does not fit the width of the target field
    #[error("{operation}: value {value} at `{path}` does not fit in {target}")]
    OutOfRange {
        operation: String,
        path: String,
        value: String,
        target: &'static str,
    },

    /// The marker list names a field the record does not have
    #[error("{operation}: explicitly set field `{field}` at `{path}` is not part of the record")]
    UnknownExplicitField {
        operation: String,
        path: String,
        field: String,
    },

    /// Nesting went past the configured limit
    #[error("{operation}: nesting at `{path}` exceeds the maximum depth of {max_depth}")]
    DepthExceeded {
        operation: String,
        path: String,
        max_depth: usize,
    },
}

impl ConversionError {
    /// Dotted path of the field the error is attributed to
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::OutOfRange { path, .. }
            | Self::UnknownExplicitField { path, .. }
            | Self::DepthExceeded { path, .. } => path,
        }
    }
}

/// A string outside an enum's closed value set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("value {value:?} is not one of {allowed:?}")]
pub struct EnumValueError {
    pub value: String,
    pub allowed: &'static [&'static str],
}

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, ConversionError>;
