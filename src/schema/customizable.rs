//! Fluent customization of field descriptors
//!
//! [`CustomizableSchema`] wraps one descriptor together with the path that
//! led to it. Every mutator rewrites the descriptor in place and returns the
//! handle for chaining. Mutators that can be misused have a `try_` twin
//! returning the [`SchemaDefect`]; the plain form aborts schema assembly.

use crate::error::{SchemaDefect, fail_fast, join_path};

use super::field_def::{DiffSuppressor, FieldDescriptor, FieldKind, Validator};
use super::path::PathContext;

#[derive(Debug, Clone, Copy)]
enum Constraint {
    ConflictsWith,
    ExactlyOneOf,
    AtLeastOneOf,
    RequiredWith,
}

impl Constraint {
    fn operation(self) -> &'static str {
        match self {
            Self::ConflictsWith => "set_conflicts_with",
            Self::ExactlyOneOf => "set_exactly_one_of",
            Self::AtLeastOneOf => "set_at_least_one_of",
            Self::RequiredWith => "set_required_with",
        }
    }

    fn slot(self, descriptor: &mut FieldDescriptor) -> &mut Vec<String> {
        match self {
            Self::ConflictsWith => &mut descriptor.conflicts_with,
            Self::ExactlyOneOf => &mut descriptor.exactly_one_of,
            Self::AtLeastOneOf => &mut descriptor.at_least_one_of,
            Self::RequiredWith => &mut descriptor.required_with,
        }
    }
}

/// Handle for customizing one descriptor
#[derive(Debug)]
pub struct CustomizableSchema<'a> {
    schema: &'a mut FieldDescriptor,
    path: Vec<String>,
    context: PathContext,
}

impl<'a> CustomizableSchema<'a> {
    /// Resolve `path` below `record`.
    ///
    /// An empty path targets `record` itself, which is how fields are added
    /// at the top level.
    pub fn at(
        record: &'a mut FieldDescriptor,
        context: PathContext,
        path: &[&str],
    ) -> Result<Self, SchemaDefect> {
        let mut current = record;
        for (depth, segment) in path.iter().enumerate() {
            let Some(fields) = current.nested.as_mut() else {
                return Err(SchemaDefect::NotNested {
                    path: join_path(path),
                    segment: depth
                        .checked_sub(1)
                        .map_or_else(String::new, |parent| path[parent].to_string()),
                });
            };
            current = fields
                .get_mut(*segment)
                .ok_or_else(|| SchemaDefect::MissingPath {
                    path: join_path(path),
                    segment: (*segment).to_string(),
                })?;
        }
        Ok(Self {
            schema: current,
            path: path.iter().map(ToString::to_string).collect(),
            context,
        })
    }

    /// The descriptor being customized
    #[must_use]
    pub fn descriptor(&self) -> &FieldDescriptor {
        self.schema
    }

    /// Path of the descriptor relative to its record
    #[must_use]
    pub fn path(&self) -> &[String] {
        &self.path
    }

    #[must_use]
    pub fn context(&self) -> &PathContext {
        &self.context
    }

    fn field_name(&self) -> &str {
        self.path.last().map_or("", String::as_str)
    }

    pub fn set_optional(&mut self) -> &mut Self {
        self.schema.optional = true;
        self.schema.required = false;
        self
    }

    pub fn set_required(&mut self) -> &mut Self {
        self.schema.optional = false;
        self.schema.required = true;
        self.schema.computed = false;
        self
    }

    pub fn set_computed(&mut self) -> &mut Self {
        self.schema.computed = true;
        self
    }

    /// Make the field output-only: computed, neither optional nor required,
    /// and without list bounds.
    pub fn set_read_only(&mut self) -> &mut Self {
        self.schema.optional = false;
        self.schema.required = false;
        self.schema.max_items = 0;
        self.schema.min_items = 0;
        self.schema.computed = true;
        self
    }

    /// Turn a list into an unordered set
    #[track_caller]
    pub fn set_slice_set(&mut self) -> &mut Self {
        if let Err(defect) = self.try_set_slice_set() {
            fail_fast(defect);
        }
        self
    }

    pub fn try_set_slice_set(&mut self) -> Result<&mut Self, SchemaDefect> {
        match self.schema.kind {
            FieldKind::List | FieldKind::Set => {
                self.schema.kind = FieldKind::Set;
                Ok(self)
            }
            kind => Err(SchemaDefect::NotList { kind }),
        }
    }

    /// Record a default value; a field with a default is optional
    pub fn set_default(&mut self, value: impl Into<serde_json::Value>) -> &mut Self {
        self.schema.default_value = Some(value.into());
        self.schema.optional = true;
        self.schema.required = false;
        self
    }

    /// Suppress diffs where the configured value is zero and the platform
    /// reports a value. Propagates to the children of a single nested record.
    pub fn set_suppress_diff(&mut self) -> &mut Self {
        let name = self.field_name().to_string();
        self.schema.suppress_zero_value_diffs(&name);
        self
    }

    /// Suppress diffs where the value was left unset and the platform reports
    /// `default`. Only valid on primitive fields.
    #[track_caller]
    pub fn set_suppress_diff_with_default(
        &mut self,
        default: impl Into<serde_json::Value>,
    ) -> &mut Self {
        if let Err(defect) = self.try_set_suppress_diff_with_default(default) {
            fail_fast(defect);
        }
        self
    }

    pub fn try_set_suppress_diff_with_default(
        &mut self,
        default: impl Into<serde_json::Value>,
    ) -> Result<&mut Self, SchemaDefect> {
        let kind = self.schema.kind;
        if !kind.is_primitive() {
            return Err(SchemaDefect::NotPrimitive { kind });
        }
        let default = diff_string(&default.into());
        self.schema.diff_suppress = Some(DiffSuppressor::with_default(kind.zero_value(), default));
        Ok(self)
    }

    pub fn set_custom_suppress_diff<F>(&mut self, suppress: F) -> &mut Self
    where
        F: Fn(&str, &str, &str) -> bool + Send + Sync + 'static,
    {
        self.schema.diff_suppress = Some(DiffSuppressor::new(suppress));
        self
    }

    pub fn set_sensitive(&mut self) -> &mut Self {
        self.schema.sensitive = true;
        self
    }

    pub fn set_force_new(&mut self) -> &mut Self {
        self.schema.force_new = true;
        self
    }

    pub fn set_max_items(&mut self, value: usize) -> &mut Self {
        self.schema.max_items = value;
        self
    }

    pub fn set_min_items(&mut self, value: usize) -> &mut Self {
        self.schema.min_items = value;
        self
    }

    pub fn set_deprecated(&mut self, reason: impl Into<String>) -> &mut Self {
        self.schema.deprecated = Some(reason.into());
        self
    }

    pub fn set_validate_func<F>(&mut self, validate: F) -> &mut Self
    where
        F: Fn(&serde_json::Value, &str) -> Result<(), String> + Send + Sync + 'static,
    {
        self.schema.validate = Some(Validator::new(validate));
        self
    }

    #[track_caller]
    pub fn set_conflicts_with(&mut self, names: &[&str]) -> &mut Self {
        self.set_constraint(Constraint::ConflictsWith, names)
    }

    #[track_caller]
    pub fn set_exactly_one_of(&mut self, names: &[&str]) -> &mut Self {
        self.set_constraint(Constraint::ExactlyOneOf, names)
    }

    #[track_caller]
    pub fn set_at_least_one_of(&mut self, names: &[&str]) -> &mut Self {
        self.set_constraint(Constraint::AtLeastOneOf, names)
    }

    #[track_caller]
    pub fn set_required_with(&mut self, names: &[&str]) -> &mut Self {
        self.set_constraint(Constraint::RequiredWith, names)
    }

    pub fn try_set_conflicts_with(&mut self, names: &[&str]) -> Result<&mut Self, SchemaDefect> {
        self.try_set_constraint(Constraint::ConflictsWith, names)
    }

    pub fn try_set_exactly_one_of(&mut self, names: &[&str]) -> Result<&mut Self, SchemaDefect> {
        self.try_set_constraint(Constraint::ExactlyOneOf, names)
    }

    pub fn try_set_at_least_one_of(&mut self, names: &[&str]) -> Result<&mut Self, SchemaDefect> {
        self.try_set_constraint(Constraint::AtLeastOneOf, names)
    }

    pub fn try_set_required_with(&mut self, names: &[&str]) -> Result<&mut Self, SchemaDefect> {
        self.try_set_constraint(Constraint::RequiredWith, names)
    }

    #[track_caller]
    fn set_constraint(&mut self, constraint: Constraint, names: &[&str]) -> &mut Self {
        if let Err(defect) = self.try_set_constraint(constraint, names) {
            fail_fast(defect);
        }
        self
    }

    fn try_set_constraint(
        &mut self,
        constraint: Constraint,
        names: &[&str],
    ) -> Result<&mut Self, SchemaDefect> {
        let operation = constraint.operation();
        if names.is_empty() {
            return Err(SchemaDefect::EmptyConstraint { operation });
        }
        // Field paths cannot address "every element" of a repeated block.
        if self.context.crosses_repeated_collection() {
            log::debug!(
                "{operation} skipped for {}, path crosses a repeated list, set or map block",
                join_path(&self.path)
            );
            return Ok(self);
        }
        *constraint.slot(self.schema) = self.context.qualify(names);
        Ok(self)
    }

    /// Add a field to the nested record. Inherits diff suppression when it
    /// is active on the receiver.
    #[track_caller]
    pub fn add_new_field(&mut self, name: &str, field: FieldDescriptor) -> &mut Self {
        if let Err(defect) = self.try_add_new_field(name, field) {
            fail_fast(defect);
        }
        self
    }

    pub fn try_add_new_field(
        &mut self,
        name: &str,
        mut field: FieldDescriptor,
    ) -> Result<&mut Self, SchemaDefect> {
        let inherit_suppression = self.schema.suppress_diff;
        let Some(fields) = self.schema.nested.as_mut() else {
            return Err(SchemaDefect::NotRecord {
                name: name.to_string(),
            });
        };
        if fields.contains_key(name) {
            return Err(SchemaDefect::DuplicateField {
                name: name.to_string(),
            });
        }
        if inherit_suppression {
            field.diff_suppress = Some(DiffSuppressor::zero_value(name, &field));
        }
        fields.insert(name.to_string(), field);
        Ok(self)
    }
}

/// String form of a default value as it appears in a diff
fn diff_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) if n.is_f64() => {
            n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string())
        }
        other => other.to_string(),
    }
}

/// Customization hook argument: one record and the path that reached it
#[derive(Debug)]
pub struct RecordCustomizer<'a> {
    record: &'a mut FieldDescriptor,
    context: PathContext,
}

impl<'a> RecordCustomizer<'a> {
    #[must_use]
    pub fn new(record: &'a mut FieldDescriptor, context: PathContext) -> Self {
        Self { record, context }
    }

    /// Customize the field at `path` within this record; an empty path
    /// targets the record itself
    #[track_caller]
    pub fn customize(&mut self, path: &[&str]) -> CustomizableSchema<'_> {
        self.try_customize(path).unwrap_or_else(|defect| fail_fast(defect))
    }

    pub fn try_customize(&mut self, path: &[&str]) -> Result<CustomizableSchema<'_>, SchemaDefect> {
        CustomizableSchema::at(self.record, self.context.clone(), path)
    }

    #[must_use]
    pub fn context(&self) -> &PathContext {
        &self.context
    }
}
