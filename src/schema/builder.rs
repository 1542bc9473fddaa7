//! Schema builder
//!
//! Field descriptors are derived from record types through two traits.
//! [`SchemaType`] maps a field's Rust type to a descriptor and is implemented
//! here for every structural wrapper; [`SchemaRecord`] is generated by
//! `#[derive(Record)]` and assembles a record's fields from their types and
//! `#[field(..)]` tags. [`StructSchema`] runs the build, exposes the
//! customizer and finally freezes the result.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::sync::Arc;

use crate::common::{Scalar, Tri};
use crate::error::{SchemaDefect, fail_fast};

use super::customizable::{CustomizableSchema, RecordCustomizer};
use super::field_def::{FieldDescriptor, FieldKind, FieldTag, RecordSchema};
use super::path::PathContext;

/// A Rust type that can appear as a field of a configuration-model record
pub trait SchemaType {
    /// Descriptor for a field of this type, before tags are applied
    fn descriptor() -> FieldDescriptor;

    /// Run the customization hooks of records reachable through this type.
    ///
    /// `descriptor` is the field's own descriptor and `context` already
    /// includes the descent into it.
    fn customize_nested(_descriptor: &mut FieldDescriptor, _context: &PathContext) {}
}

/// A configuration-model record, implemented by `#[derive(Record)]`
pub trait SchemaRecord: SchemaType {
    /// Descriptors of this record's schema fields
    fn record_schema() -> RecordSchema;

    /// Customize `descriptor`, which wraps this record's fields.
    ///
    /// Nested records are customized first, then the record's own hook runs
    /// so that it can override what its children set.
    fn customize_record(descriptor: &mut FieldDescriptor, context: &PathContext);
}

impl<T: Scalar> SchemaType for Tri<T> {
    fn descriptor() -> FieldDescriptor {
        T::descriptor()
    }
}

impl<T: SchemaType> SchemaType for Option<T> {
    fn descriptor() -> FieldDescriptor {
        let mut descriptor = T::descriptor();
        if descriptor.kind == FieldKind::Record {
            descriptor.kind = FieldKind::PointerRecord;
        }
        descriptor
    }

    fn customize_nested(descriptor: &mut FieldDescriptor, context: &PathContext) {
        T::customize_nested(descriptor, context);
    }
}

impl<T: SchemaType> SchemaType for Box<T> {
    fn descriptor() -> FieldDescriptor {
        T::descriptor()
    }

    fn customize_nested(descriptor: &mut FieldDescriptor, context: &PathContext) {
        T::customize_nested(descriptor, context);
    }
}

impl<T: SchemaType> SchemaType for Vec<T> {
    fn descriptor() -> FieldDescriptor {
        FieldDescriptor::collection(FieldKind::List, T::descriptor())
    }

    fn customize_nested(descriptor: &mut FieldDescriptor, context: &PathContext) {
        T::customize_nested(descriptor, context);
    }
}

impl<T: SchemaType> SchemaType for BTreeMap<String, T> {
    fn descriptor() -> FieldDescriptor {
        FieldDescriptor::collection(FieldKind::Map, T::descriptor())
    }

    fn customize_nested(descriptor: &mut FieldDescriptor, context: &PathContext) {
        T::customize_nested(descriptor, context);
    }
}

impl<T: SchemaType, S: BuildHasher> SchemaType for HashMap<String, T, S> {
    fn descriptor() -> FieldDescriptor {
        FieldDescriptor::collection(FieldKind::Map, T::descriptor())
    }

    fn customize_nested(descriptor: &mut FieldDescriptor, context: &PathContext) {
        T::customize_nested(descriptor, context);
    }
}

/// Build the descriptor of one record field from its type and tag
#[must_use]
pub fn build_field<T: SchemaType>(name: &str, tag: &FieldTag) -> FieldDescriptor {
    let mut descriptor = T::descriptor();
    tag.apply(name, &mut descriptor);
    descriptor
}

/// Customize the records nested under field `name` of `record`
pub fn customize_field<T: SchemaType>(
    record: &mut FieldDescriptor,
    name: &str,
    context: &PathContext,
) {
    let Some(field) = record.nested.as_mut().and_then(|fields| fields.get_mut(name)) else {
        return;
    };
    if field.nested.is_none() {
        return;
    }
    let context = context.descend(name, field);
    T::customize_nested(field, &context);
}

/// Run a record's own customization hook
pub fn run_hook(
    record: &mut FieldDescriptor,
    context: &PathContext,
    hook: fn(&mut RecordCustomizer<'_>),
) {
    hook(&mut RecordCustomizer::new(record, context.clone()));
}

/// Schema under construction.
///
/// Holds the descriptor tree of one top-level record until
/// [`freeze`](StructSchema::freeze) publishes it.
#[derive(Debug, Clone)]
pub struct StructSchema {
    root: FieldDescriptor,
}

impl StructSchema {
    /// Build the schema of `R`, running every customization hook
    #[must_use]
    pub fn of<R: SchemaRecord>() -> Self {
        let mut root = FieldDescriptor::record(R::record_schema());
        R::customize_record(&mut root, &PathContext::new());
        log::debug!(
            "Built schema for {} with {} top-level fields",
            std::any::type_name::<R>(),
            root.nested.as_ref().map_or(0, RecordSchema::len)
        );
        Self { root }
    }

    /// Start from hand-assembled fields
    #[must_use]
    pub fn from_fields(fields: RecordSchema) -> Self {
        Self {
            root: FieldDescriptor::record(fields),
        }
    }

    /// Customize the field at `path`; an empty path targets the record itself
    #[track_caller]
    pub fn customize(&mut self, path: &[&str]) -> CustomizableSchema<'_> {
        self.customize_in(PathContext::new(), path)
    }

    /// Customize the field at `path` as seen from `context`
    #[track_caller]
    pub fn customize_in(&mut self, context: PathContext, path: &[&str]) -> CustomizableSchema<'_> {
        self.try_customize_in(context, path)
            .unwrap_or_else(|defect| fail_fast(defect))
    }

    pub fn try_customize_in(
        &mut self,
        context: PathContext,
        path: &[&str],
    ) -> Result<CustomizableSchema<'_>, SchemaDefect> {
        CustomizableSchema::at(&mut self.root, context, path)
    }

    /// Top-level fields
    #[must_use]
    pub fn fields(&self) -> &RecordSchema {
        nested_fields(&self.root)
    }

    /// Publish the schema; no mutation is possible afterwards
    #[must_use]
    pub fn freeze(self) -> FrozenSchema {
        FrozenSchema {
            fields: Arc::new(self.root.nested.unwrap_or_default()),
        }
    }
}

fn nested_fields(descriptor: &FieldDescriptor) -> &RecordSchema {
    static EMPTY: RecordSchema = BTreeMap::new();
    descriptor.nested.as_ref().unwrap_or(&EMPTY)
}

/// Read-only, shareable view of a finished schema
#[derive(Debug, Clone)]
pub struct FrozenSchema {
    fields: Arc<RecordSchema>,
}

impl FrozenSchema {
    #[must_use]
    pub fn fields(&self) -> &RecordSchema {
        &self.fields
    }

    /// Look up a descriptor by its path through nested records
    #[must_use]
    pub fn field(&self, path: &[&str]) -> Option<&FieldDescriptor> {
        let (first, rest) = path.split_first()?;
        rest.iter()
            .try_fold(self.fields.get(*first)?, |current, segment| current.field(segment))
    }

    /// JSON rendering of the schema, without function-valued attributes
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self.fields.as_ref())
    }
}
