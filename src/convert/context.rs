//! Conversion context and traversal state.

use std::borrow::Cow;
use std::fmt::Display;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::config::ConverterConfig;
use crate::error::{ConversionError, Result, join_path};

/// Per-operation handle threaded through a conversion.
///
/// Carries the label used to attribute diagnostics and the converter
/// configuration. The converter never waits on it.
#[derive(Debug, Clone)]
pub struct ConversionContext {
    operation: Cow<'static, str>,
    config: ConverterConfig,
}

impl Default for ConversionContext {
    fn default() -> Self {
        Self::new("convert")
    }
}

impl ConversionContext {
    /// Context labelled with the operation it serves, e.g. `"pipeline.create"`
    #[must_use]
    pub fn new(operation: impl Into<Cow<'static, str>>) -> Self {
        Self {
            operation: operation.into(),
            config: ConverterConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: ConverterConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn operation(&self) -> &str {
        &self.operation
    }

    #[must_use]
    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }
}

/// Position of a conversion inside the record being walked
#[derive(Debug)]
pub struct Walk<'a> {
    context: &'a ConversionContext,
    path: SmallVec<[String; 8]>,
}

impl<'a> Walk<'a> {
    #[must_use]
    pub fn new(context: &'a ConversionContext) -> Self {
        Self {
            context,
            path: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn context(&self) -> &ConversionContext {
        self.context
    }

    /// Dotted path of the current position
    #[must_use]
    pub fn path(&self) -> String {
        join_path(&self.path)
    }

    /// Run `convert` one level deeper, at `segment`
    pub fn descend<T>(
        &mut self,
        segment: impl Into<String>,
        convert: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let segment = segment.into();
        let max_depth = self.context.config.max_depth;
        if self.path.len() >= max_depth {
            return Err(ConversionError::DepthExceeded {
                operation: self.context.operation.to_string(),
                path: join_path(self.path.iter().chain(std::iter::once(&segment))),
                max_depth,
            });
        }
        self.path.push(segment);
        let converted = convert(self);
        self.path.pop();
        converted
    }

    /// Error for a numeric value that does not fit `target`
    #[must_use]
    pub fn out_of_range(&self, value: impl Display, target: &'static str) -> ConversionError {
        ConversionError::OutOfRange {
            operation: self.context.operation.to_string(),
            path: self.path(),
            value: value.to_string(),
            target,
        }
    }

    /// Check that every marker names one of `fields`
    pub fn check_explicit_fields(&self, markers: &[String], fields: &[&str]) -> Result<()> {
        if markers.is_empty() {
            return Ok(());
        }
        let known: FxHashSet<&str> = fields.iter().copied().collect();
        for marker in markers.iter().filter(|m| !known.contains(m.as_str())) {
            if self.context.config.strict_explicit_fields {
                return Err(ConversionError::UnknownExplicitField {
                    operation: self.context.operation.to_string(),
                    path: self.path(),
                    field: marker.clone(),
                });
            }
            log::warn!(
                "{}: ignoring unknown explicitly set field `{marker}` at `{}`",
                self.context.operation,
                self.path()
            );
        }
        Ok(())
    }

    /// Trace the conversion of a record when enabled
    pub fn trace_record(&self, record: &str, direction: &str) {
        if self.context.config.log_conversions {
            log::trace!(
                "{}: converting {record} {direction} at `{}`",
                self.context.operation,
                self.path()
            );
        }
    }
}
