//! Field descriptor for the schema system
//!
//! A [`FieldDescriptor`] is the schema unit: one field's kind, cardinality and
//! behavioural flags. Descriptors for nested records own the descriptors of
//! their fields through [`RecordSchema`].

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::hooks::{DiffSuppressor, Validator};

/// Fields of one record, keyed by schema name
pub type RecordSchema = BTreeMap<String, FieldDescriptor>;

/// Primitive scalar types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ScalarType {
    /// Boolean value
    Bool,
    /// Integer value
    Int,
    /// Floating point value
    Float,
    /// Text value
    String,
}

/// The kind of value a field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FieldKind {
    /// Primitive scalar
    Scalar(ScalarType),
    /// String from a closed set of values
    Enum,
    /// Ordered sequence
    List,
    /// Unordered set
    Set,
    /// String-keyed map
    Map,
    /// Nested record that is always present
    Record,
    /// Nested record that may be absent
    PointerRecord,
}

impl FieldKind {
    /// Whether values of this kind are primitive (scalars and enums)
    #[must_use]
    pub fn is_primitive(self) -> bool {
        matches!(self, Self::Scalar(_) | Self::Enum)
    }

    /// String form of this kind's zero value, as it appears in a diff
    #[must_use]
    pub fn zero_value(self) -> &'static str {
        match self {
            Self::Scalar(ScalarType::Bool) => "false",
            Self::Scalar(ScalarType::Int | ScalarType::Float) => "0",
            Self::Scalar(ScalarType::String) | Self::Enum => "",
            Self::Map => "{}",
            Self::List | Self::Set | Self::Record | Self::PointerRecord => "[]",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(ScalarType::Bool) => write!(f, "Bool"),
            Self::Scalar(ScalarType::Int) => write!(f, "Int"),
            Self::Scalar(ScalarType::Float) => write!(f, "Float"),
            Self::Scalar(ScalarType::String) => write!(f, "String"),
            Self::Enum => write!(f, "Enum"),
            Self::List => write!(f, "List"),
            Self::Set => write!(f, "Set"),
            Self::Map => write!(f, "Map"),
            Self::Record => write!(f, "Record"),
            Self::PointerRecord => write!(f, "PointerRecord"),
        }
    }
}

/// Schema unit describing one field
#[derive(Debug, Clone, Serialize)]
pub struct FieldDescriptor {
    /// Kind of value held by the field
    pub kind: FieldKind,
    /// Element kind for scalar collections
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elem: Option<FieldKind>,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub sensitive: bool,
    pub force_new: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,
    #[serde(skip)]
    pub diff_suppress: Option<DiffSuppressor>,
    /// Generic diff suppression was requested on this field
    pub suppress_diff: bool,
    pub max_items: usize,
    pub min_items: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conflicts_with: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exactly_one_of: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub at_least_one_of: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required_with: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
    #[serde(skip)]
    pub validate: Option<Validator>,
    /// Closed value set of an enum field
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_values: Vec<String>,
    /// Fields of the nested record, for record kinds and collections of records
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nested: Option<RecordSchema>,
}

impl FieldDescriptor {
    /// Create a required descriptor of the given kind
    #[must_use]
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            elem: None,
            required: true,
            optional: false,
            computed: false,
            sensitive: false,
            force_new: false,
            default_value: None,
            diff_suppress: None,
            suppress_diff: false,
            max_items: 0,
            min_items: 0,
            conflicts_with: Vec::new(),
            exactly_one_of: Vec::new(),
            at_least_one_of: Vec::new(),
            required_with: Vec::new(),
            deprecated: None,
            validate: None,
            allowed_values: Vec::new(),
            nested: None,
        }
    }

    #[must_use]
    pub fn scalar(scalar: ScalarType) -> Self {
        Self::new(FieldKind::Scalar(scalar))
    }

    /// Enum field restricted to `values`
    #[must_use]
    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut descriptor = Self::new(FieldKind::Enum);
        descriptor.allowed_values = values.into_iter().map(Into::into).collect();
        descriptor
    }

    /// Nested record that is always present
    #[must_use]
    pub fn record(fields: RecordSchema) -> Self {
        Self::new(FieldKind::Record).with_nested(fields)
    }

    /// Nested record that may be absent
    #[must_use]
    pub fn pointer_record(fields: RecordSchema) -> Self {
        Self::new(FieldKind::PointerRecord).with_nested(fields)
    }

    /// Collection of the given kind whose element is described by `element`
    ///
    /// Record elements contribute their nested fields, scalar and enum
    /// elements their kind and allowed values.
    #[must_use]
    pub fn collection(kind: FieldKind, element: FieldDescriptor) -> Self {
        let mut descriptor = Self::new(kind);
        match element.nested {
            Some(fields) => descriptor.nested = Some(fields),
            None => {
                descriptor.elem = Some(element.kind);
                descriptor.allowed_values = element.allowed_values;
            }
        }
        descriptor
    }

    fn with_nested(mut self, fields: RecordSchema) -> Self {
        self.nested = Some(fields);
        self
    }

    /// Whether the field is semantically one optional nested record
    ///
    /// Record kinds always are; a List or Set of records is when it is
    /// bounded to a single item.
    #[must_use]
    pub fn is_single_nested(&self) -> bool {
        if self.nested.is_none() {
            return false;
        }
        match self.kind {
            FieldKind::Record | FieldKind::PointerRecord => true,
            FieldKind::List | FieldKind::Set => self.max_items == 1,
            _ => false,
        }
    }

    /// Whether the field holds many values that no single path can address
    ///
    /// That is a List or Set not bounded to one item, or a map of records.
    #[must_use]
    pub fn is_repeated(&self) -> bool {
        match self.kind {
            FieldKind::List | FieldKind::Set => self.max_items != 1,
            FieldKind::Map => self.nested.is_some(),
            _ => false,
        }
    }

    /// Whether the user may not supply a value
    #[must_use]
    pub fn is_output_only(&self) -> bool {
        self.computed && !self.optional && !self.required && self.default_value.is_none()
    }

    /// Look up a field of the nested record
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.nested.as_ref()?.get(name)
    }

    /// Install the zero-value diff suppressor on this field.
    ///
    /// On a single nested record every immediate child gets its own
    /// suppressor too, since changes inside the collapsed record show up as
    /// changes to this field.
    pub fn suppress_zero_value_diffs(&mut self, field_name: &str) {
        self.diff_suppress = Some(DiffSuppressor::zero_value(field_name, self));
        self.suppress_diff = true;
        if !self.is_single_nested() {
            return;
        }
        if let Some(fields) = self.nested.as_mut() {
            for (name, child) in fields.iter_mut() {
                child.diff_suppress = Some(DiffSuppressor::zero_value(name, child));
            }
        }
    }
}
