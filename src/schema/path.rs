//! Path context for nested schema customization
//!
//! A [`PathContext`] records how a nested record was reached: the dotted path
//! prefix (`a.0.b.0`) and the shape of every descriptor traversed. It is a
//! persistent chain; [`PathContext::descend`] returns a new context that
//! shares its parent's links, so sibling branches of a schema walk never see
//! each other's segments.

use std::sync::Arc;

use crate::error::join_path;

use super::field_def::{FieldDescriptor, FieldKind};

/// Segment appended after every field name, standing for "any element" of a
/// list or set
pub const INDEX_PLACEHOLDER: &str = "0";

/// The part of a traversed descriptor that path-dependent customizations
/// consult
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptorShape {
    pub kind: FieldKind,
    pub max_items: usize,
    repeated: bool,
}

impl DescriptorShape {
    /// Whether the descriptor was a repeated collection or a map of records
    #[must_use]
    pub fn is_repeated(&self) -> bool {
        self.repeated
    }
}

impl From<&FieldDescriptor> for DescriptorShape {
    fn from(descriptor: &FieldDescriptor) -> Self {
        Self {
            kind: descriptor.kind,
            max_items: descriptor.max_items,
            repeated: descriptor.is_repeated(),
        }
    }
}

#[derive(Debug)]
struct PathLink {
    parent: Option<Arc<PathLink>>,
    field: String,
    shape: DescriptorShape,
}

/// Immutable, append-only record of the path to a nested record
#[derive(Debug, Clone, Default)]
pub struct PathContext {
    tail: Option<Arc<PathLink>>,
    depth: usize,
}

impl PathContext {
    /// The context at the top of a record
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for the record nested under `field`
    #[must_use]
    pub fn descend(&self, field: impl Into<String>, descriptor: &FieldDescriptor) -> Self {
        Self {
            tail: Some(Arc::new(PathLink {
                parent: self.tail.clone(),
                field: field.into(),
                shape: descriptor.into(),
            })),
            depth: self.depth + 1,
        }
    }

    /// Number of descents from the top-level record
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.depth == 0
    }

    fn links(&self) -> Vec<&PathLink> {
        let mut links = Vec::with_capacity(self.depth);
        let mut cursor = self.tail.as_deref();
        while let Some(link) = cursor {
            links.push(link);
            cursor = link.parent.as_deref();
        }
        links.reverse();
        links
    }

    /// Path segments, a field name followed by [`INDEX_PLACEHOLDER`] per descent
    #[must_use]
    pub fn segments(&self) -> Vec<String> {
        self.links()
            .into_iter()
            .flat_map(|link| [link.field.clone(), INDEX_PLACEHOLDER.to_string()])
            .collect()
    }

    /// Shapes of the descriptors traversed, outermost first
    #[must_use]
    pub fn chain(&self) -> Vec<DescriptorShape> {
        self.links().into_iter().map(|link| link.shape).collect()
    }

    /// Whether any traversed descriptor is repeated
    ///
    /// Lists and Sets bounded to one item are not. Maps of records are, since
    /// a map key has no placeholder segment.
    #[must_use]
    pub fn crosses_repeated_collection(&self) -> bool {
        let mut cursor = self.tail.as_deref();
        while let Some(link) = cursor {
            if link.shape.is_repeated() {
                return true;
            }
            cursor = link.parent.as_deref();
        }
        false
    }

    /// Qualify sibling-relative field names with this context's path
    #[must_use]
    pub fn qualify(&self, names: &[&str]) -> Vec<String> {
        if self.is_empty() {
            return names.iter().map(ToString::to_string).collect();
        }
        let prefix = join_path(self.segments());
        names.iter().map(|name| format!("{prefix}.{name}")).collect()
    }
}
