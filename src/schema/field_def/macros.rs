//! Macros for declaring enumerated string types
//!
//! This module provides the `string_enum!` macro used by record definitions.

/// Declare a string-backed enum usable as a [`Tri`](crate::Tri) scalar.
///
/// The type is a newtype over a string. `FromStr` validates against the
/// declared values; conversion and deserialization carry the literal string
/// unchanged. The empty string is the zero value.
///
/// # Example
///
/// ```rust
/// use schema_bridge::string_enum;
///
/// string_enum! {
///     /// The deployment method that manages the pipeline
///     pub struct DeploymentKind {
///         BUNDLE = "BUNDLE",
///     }
/// }
///
/// let kind: DeploymentKind = "BUNDLE".parse().unwrap();
/// assert_eq!(kind, DeploymentKind::BUNDLE);
/// assert!("NOTEBOOK".parse::<DeploymentKind>().is_err());
/// ```
#[macro_export]
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $value:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        $vis struct $name(::std::borrow::Cow<'static, str>);

        #[allow(non_upper_case_globals)]
        impl $name {
            $(
                $(#[$variant_meta])*
                pub const $variant: Self = Self(::std::borrow::Cow::Borrowed($value));
            )*

            /// Every value this enum accepts
            pub const VALUES: &'static [&'static str] = &[$($value),*];

            /// Wrap a string without validating it
            pub fn from_raw(value: impl Into<String>) -> Self {
                Self(::std::borrow::Cow::Owned(value.into()))
            }

            /// The literal string value
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::error::EnumValueError;

            fn from_str(value: &str) -> ::std::result::Result<Self, Self::Err> {
                if Self::VALUES.contains(&value) {
                    Ok(Self::from_raw(value))
                } else {
                    Err($crate::error::EnumValueError {
                        value: value.to_string(),
                        allowed: Self::VALUES,
                    })
                }
            }
        }

        impl $crate::common::Scalar for $name {
            fn descriptor() -> $crate::schema::FieldDescriptor {
                $crate::schema::FieldDescriptor::enumeration(Self::VALUES.iter().copied())
            }
        }

        impl $crate::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                let value =
                    <String as $crate::__private::serde::Deserialize>::deserialize(deserializer)?;
                Ok(Self::from_raw(value))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::common::Scalar;
    use crate::schema::FieldKind;

    string_enum! {
        pub struct Channel {
            CURRENT = "CURRENT",
            PREVIEW = "PREVIEW",
        }
    }

    #[test]
    fn test_parse_validates() {
        assert_eq!("PREVIEW".parse::<Channel>().unwrap(), Channel::PREVIEW);
        let err = "NIGHTLY".parse::<Channel>().unwrap_err();
        assert_eq!(err.value, "NIGHTLY");
        assert_eq!(err.allowed, &["CURRENT", "PREVIEW"]);
    }

    #[test]
    fn test_raw_values_are_kept() {
        let raw = Channel::from_raw("NIGHTLY");
        assert_eq!(raw.as_str(), "NIGHTLY");
        assert_eq!(Channel::default().as_str(), "");
        assert_eq!(Channel::from_raw("CURRENT"), Channel::CURRENT);
    }

    #[test]
    fn test_enum_descriptor() {
        let descriptor = Channel::descriptor();
        assert_eq!(descriptor.kind, FieldKind::Enum);
        assert_eq!(descriptor.allowed_values, vec!["CURRENT", "PREVIEW"]);
    }
}
