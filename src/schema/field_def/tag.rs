//! Field tag mini-language
//!
//! A tag is a comma-separated list of tokens attached to a record field with
//! `#[field(tag = "...")]`. Absence of `optional` means the field is
//! required.

use crate::error::{SchemaDefect, fail_fast};

use super::field::{FieldDescriptor, FieldKind};

/// Field name that excludes a field from the schema
pub const SKIP_SENTINEL: &str = "-";

/// Parsed field tag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTag {
    pub optional: bool,
    pub computed: bool,
    pub sensitive: bool,
    pub force_new: bool,
    pub suppress_diff: bool,
    pub slice_set: bool,
    pub max_items: Option<usize>,
    pub min_items: Option<usize>,
}

impl FieldTag {
    /// Parse a tag string such as `"optional,max_items:1"`
    pub fn parse(tag: &str) -> Result<Self, SchemaDefect> {
        let mut parsed = Self::default();
        for token in tag.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match token.split_once(':') {
                Some((name @ ("max_items" | "min_items"), argument)) => {
                    let value = argument.trim().parse::<usize>().map_err(|_| {
                        SchemaDefect::InvalidTagArgument {
                            token: name.to_string(),
                            argument: argument.to_string(),
                        }
                    })?;
                    if name == "max_items" {
                        parsed.max_items = Some(value);
                    } else {
                        parsed.min_items = Some(value);
                    }
                }
                Some(_) => {
                    return Err(SchemaDefect::UnknownTagToken {
                        token: token.to_string(),
                    });
                }
                None => match token {
                    "optional" => parsed.optional = true,
                    "computed" => parsed.computed = true,
                    "sensitive" => parsed.sensitive = true,
                    "force_new" => parsed.force_new = true,
                    "suppress_diff" => parsed.suppress_diff = true,
                    "slice_set" => parsed.slice_set = true,
                    _ => {
                        return Err(SchemaDefect::UnknownTagToken {
                            token: token.to_string(),
                        });
                    }
                },
            }
        }
        Ok(parsed)
    }

    /// Parse a tag, aborting schema assembly if it is malformed
    #[must_use]
    #[track_caller]
    pub fn must_parse(tag: &str) -> Self {
        Self::parse(tag).unwrap_or_else(|defect| fail_fast(defect))
    }

    /// Apply the tag to a freshly built descriptor, aborting schema assembly
    /// if a token does not fit the field's kind
    #[track_caller]
    pub fn apply(&self, field_name: &str, descriptor: &mut FieldDescriptor) {
        if let Err(defect) = self.try_apply(field_name, descriptor) {
            fail_fast(defect);
        }
    }

    /// Apply the tag, leaving the descriptor untouched if a token does not
    /// fit the field's kind
    pub fn try_apply(
        &self,
        field_name: &str,
        descriptor: &mut FieldDescriptor,
    ) -> Result<(), SchemaDefect> {
        self.check_kind(descriptor.kind)?;
        if self.optional {
            descriptor.optional = true;
            descriptor.required = false;
        }
        if self.computed {
            descriptor.computed = true;
            if !self.optional {
                descriptor.required = false;
            }
        }
        descriptor.sensitive |= self.sensitive;
        descriptor.force_new |= self.force_new;
        if self.slice_set {
            descriptor.kind = FieldKind::Set;
        }
        if let Some(max_items) = self.max_items {
            descriptor.max_items = max_items;
        }
        if let Some(min_items) = self.min_items {
            descriptor.min_items = min_items;
        }
        if self.suppress_diff {
            descriptor.suppress_zero_value_diffs(field_name);
        }
        Ok(())
    }

    fn check_kind(&self, kind: FieldKind) -> Result<(), SchemaDefect> {
        if matches!(kind, FieldKind::List | FieldKind::Set) {
            return Ok(());
        }
        if self.slice_set {
            return Err(SchemaDefect::NotList { kind });
        }
        match (self.max_items, self.min_items) {
            (Some(_), _) => Err(SchemaDefect::NotBounded { token: "max_items", kind }),
            (None, Some(_)) => Err(SchemaDefect::NotBounded { token: "min_items", kind }),
            (None, None) => Ok(()),
        }
    }
}
