//! Tri-state scalar wrapper used by configuration-model records.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A configured scalar: unset, explicitly null, or present with a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Tri<T> {
    /// Not mentioned in configuration
    #[default]
    Unset,
    /// Explicitly configured as null
    Null,
    /// Configured with a value
    Value(T),
}

impl<T> Tri<T> {
    #[must_use]
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Whether a value is present
    #[must_use]
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// Borrow the value, if present
    #[must_use]
    pub fn as_value(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Unset | Self::Null => None,
        }
    }

    /// Take the value, if present
    #[must_use]
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Unset | Self::Null => None,
        }
    }
}

impl<T> From<T> for Tri<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T: Serialize> Serialize for Tri<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(value) => serializer.serialize_some(value),
            Self::Unset | Self::Null => serializer.serialize_none(),
        }
    }
}

/// A missing key never reaches this impl; pair the field with
/// `#[serde(default)]` so that it stays [`Tri::Unset`].
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Tri<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Self::Value(value),
            None => Self::Null,
        })
    }
}
