//! Utility functions for procedural macros

/// Field name that excludes a field from the schema
pub const SKIP_SENTINEL: &str = "-";

/// Marker list field assumed on domain records
pub const DEFAULT_MARKER_FIELD: &str = "force_send_fields";

const FLAG_TOKENS: &[&str] = &[
    "optional",
    "computed",
    "sensitive",
    "force_new",
    "suppress_diff",
    "slice_set",
];

const COUNT_TOKENS: &[&str] = &["max_items", "min_items"];

/// Identifier text without a raw-identifier prefix
pub fn unraw(ident: &syn::Ident) -> String {
    let text = ident.to_string();
    text.strip_prefix("r#").map_or_else(|| text.clone(), str::to_string)
}

/// Check a field tag at compile time.
///
/// Mirrors the runtime tag parser so that typos surface as compile errors
/// on the offending field.
pub fn validate_tag(tag: &str) -> Result<(), String> {
    for token in tag.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        match token.split_once(':') {
            Some((name, argument)) if COUNT_TOKENS.contains(&name) => {
                if argument.trim().parse::<usize>().is_err() {
                    return Err(format!(
                        "`{name}` expects a non-negative integer, found `{argument}`"
                    ));
                }
            }
            None if FLAG_TOKENS.contains(&token) => {}
            _ => {
                return Err(format!(
                    "unknown tag token `{token}`, expected one of: {}, max_items:N, min_items:N",
                    FLAG_TOKENS.join(", ")
                ));
            }
        }
    }
    Ok(())
}

/// Records are plain data shapes; generic parameters are not supported
pub fn reject_generics(generics: &syn::Generics) -> darling::Result<()> {
    match generics.params.first() {
        Some(param) => Err(
            darling::Error::custom("Record cannot be derived for generic structs").with_span(param),
        ),
        None => Ok(()),
    }
}
