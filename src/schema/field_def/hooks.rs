//! Function-valued descriptor attributes: diff suppressors and validators.

use std::fmt;
use std::sync::Arc;

use super::field::FieldDescriptor;

type SuppressFn = dyn Fn(&str, &str, &str) -> bool + Send + Sync;
type ValidateFn = dyn Fn(&serde_json::Value, &str) -> Result<(), String> + Send + Sync;

/// Decides whether a pending change on a field should be hidden.
///
/// Called with the flattened key, the recorded (platform) value and the new
/// (configured) value, all in their string form.
#[derive(Clone)]
pub struct DiffSuppressor(Arc<SuppressFn>);

impl DiffSuppressor {
    /// Wrap a suppression function
    pub fn new<F>(suppress: F) -> Self
    where
        F: Fn(&str, &str, &str) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(suppress))
    }

    /// Suppress changes where the platform filled in a value left unset.
    ///
    /// A diff is hidden when the configured value is the kind's zero value
    /// and the recorded one is not, or when a collection count drops to
    /// zero in configuration only.
    #[must_use]
    pub fn zero_value(field_name: &str, descriptor: &FieldDescriptor) -> Self {
        let field_name = field_name.to_string();
        let zero = descriptor.kind.zero_value();
        Self::new(move |key, old, new| {
            let collection_count = key.ends_with(".#") && new == "0" && old != "0";
            if collection_count || (new == zero && old != zero) {
                log::debug!(
                    "Suppressing diff for {key} ({field_name}): platform={old:?} config={new:?}"
                );
                return true;
            }
            false
        })
    }

    /// Suppress changes where the value was left unset and the platform
    /// reports `default`.
    #[must_use]
    pub fn with_default(zero: &'static str, default: String) -> Self {
        Self::new(move |_key, old, new| new == zero && old == default)
    }

    /// Whether the change from `old` to `new` on `key` is hidden
    #[must_use]
    pub fn suppresses(&self, key: &str, old: &str, new: &str) -> bool {
        (self.0)(key, old, new)
    }
}

impl fmt::Debug for DiffSuppressor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DiffSuppressor(..)")
    }
}

/// Validates a configured value; `Err` carries the message shown to the user.
#[derive(Clone)]
pub struct Validator(Arc<ValidateFn>);

impl Validator {
    pub fn new<F>(validate: F) -> Self
    where
        F: Fn(&serde_json::Value, &str) -> Result<(), String> + Send + Sync + 'static,
    {
        Self(Arc::new(validate))
    }

    /// Validate `value` configured at `path`
    pub fn validate(&self, value: &serde_json::Value, path: &str) -> Result<(), String> {
        (self.0)(value, path)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validator(..)")
    }
}
