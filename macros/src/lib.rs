//! Procedural macros for the schema-bridge crate
//!
//! `#[derive(Record)]` turns a configuration-model struct into a schema
//! source and, when a domain counterpart is named, into one side of a
//! bidirectional conversion.

use proc_macro::TokenStream;

mod record;
mod utils;

#[cfg(test)]
mod tests;

/// Derive macro for configuration-model records
///
/// Generates `SchemaType` and `SchemaRecord`, plus `Bridge<Domain>` when
/// `#[record(domain = "..")]` is given.
///
/// # Record options
///
/// - `domain = "path::Type"`: domain-model counterpart, which must implement `Default`
/// - `explicit = "field"`: marker list field on the domain record (default `force_send_fields`)
/// - `no_explicit`: the domain record has no marker list
/// - `customize = "path::function"`: hook taking `&mut RecordCustomizer<'_>`
///
/// # Field options
///
/// - `name = "..."`: schema name, `"-"` excludes the field from the schema
/// - `tag = "..."`: comma-separated tag tokens such as `optional` or `max_items:1`
/// - `skip`: exclude from the schema but keep converting
/// - `local`: exclude from the schema and from conversion
/// - `domain = "..."`: domain field name when it differs
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Debug, Default, Record)]
/// #[record(domain = "api::Cluster")]
/// struct ClusterConfig {
///     #[field(tag = "optional")]
///     autoscale: Tri<bool>,
///
///     #[field(tag = "optional,computed")]
///     num_workers: Tri<i64>,
///
///     #[field(name = "-")]
///     cluster_id: Tri<String>,
/// }
/// ```
#[proc_macro_derive(Record, attributes(record, field))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::process_derive_record(input)
}
