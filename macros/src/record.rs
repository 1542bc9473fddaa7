//! Record derive macro implementation
//!
//! Generates the schema and conversion impls for a configuration-model
//! struct. Field types are never inspected here: every field type dispatches
//! through the library's `SchemaType` and `Bridge` impls, so the expansion is
//! the same for scalars, nested records and collections.

use darling::{ast, FromDeriveInput, FromField};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

use crate::utils;

/// Receiver for the struct that derives `Record`
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(record), supports(struct_named))]
pub(crate) struct RecordReceiver {
    ident: syn::Ident,
    generics: syn::Generics,
    /// Domain-model counterpart; without it only the schema impls are generated
    #[darling(default)]
    domain: Option<syn::Path>,
    /// Name of the domain record's marker list field
    #[darling(default)]
    explicit: Option<syn::Ident>,
    /// The domain record has no marker list
    #[darling(default)]
    no_explicit: bool,
    /// Customization hook run after nested records are customized
    #[darling(default)]
    customize: Option<syn::Path>,
    data: ast::Data<(), RecordFieldReceiver>,
}

/// Receiver for the fields in the struct
#[derive(Debug, FromField)]
#[darling(attributes(field))]
pub(crate) struct RecordFieldReceiver {
    ident: Option<syn::Ident>,
    ty: syn::Type,
    /// Schema field name, `-` excludes the field from the schema
    #[darling(default)]
    name: Option<String>,
    #[darling(default)]
    tag: Option<String>,
    /// Exclude from the schema but keep converting
    #[darling(default)]
    skip: bool,
    /// Exclude from both the schema and conversion
    #[darling(default)]
    local: bool,
    /// Domain field when it is named differently
    #[darling(default)]
    domain: Option<syn::Ident>,
}

/// A field after attribute resolution
struct ResolvedField<'a> {
    ident: &'a syn::Ident,
    ty: &'a syn::Type,
    /// Name in the schema, `None` when excluded from it
    schema_name: Option<String>,
    tag: String,
    /// Domain field, `None` when the field is local
    domain: Option<syn::Ident>,
}

impl ResolvedField<'_> {
    /// Segment used in conversion error paths
    fn path_segment(&self) -> String {
        self.schema_name
            .clone()
            .unwrap_or_else(|| utils::unraw(self.ident))
    }
}

/// Process the Record derive macro
pub fn process_derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_record(&input) {
        Ok(expanded) => expanded.into(),
        Err(err) => err.write_errors().into(),
    }
}

/// Expand `#[derive(Record)]` for an already parsed item
pub(crate) fn expand_record(input: &DeriveInput) -> darling::Result<TokenStream2> {
    let receiver = RecordReceiver::from_derive_input(input)?;
    utils::reject_generics(&receiver.generics)?;

    let ast::Data::Struct(fields) = &receiver.data else {
        unreachable!("Darling ensures this is a struct")
    };

    let mut errors = darling::Error::accumulator();
    let resolved: Vec<ResolvedField<'_>> = fields
        .iter()
        .filter_map(|field| errors.handle(resolve_field(field)))
        .collect();
    if receiver.no_explicit && receiver.explicit.is_some() {
        errors.push(darling::Error::custom(
            "`explicit` and `no_explicit` cannot be combined",
        ));
    }
    errors.finish()?;

    let schema_impls = generate_schema_impls(&receiver, &resolved);
    let bridge_impl = receiver
        .domain
        .as_ref()
        .map(|domain| generate_bridge_impl(&receiver, domain, &resolved));

    Ok(quote! {
        #schema_impls
        #bridge_impl
    })
}

fn resolve_field(field: &RecordFieldReceiver) -> darling::Result<ResolvedField<'_>> {
    let Some(ident) = field.ident.as_ref() else {
        return Err(darling::Error::custom("Record fields must be named"));
    };
    let tag = field.tag.clone().unwrap_or_default();
    if let Err(message) = utils::validate_tag(&tag) {
        return Err(darling::Error::custom(message).with_span(ident));
    }
    if field.local && field.domain.is_some() {
        return Err(
            darling::Error::custom("a `local` field has no domain counterpart").with_span(ident),
        );
    }

    let schema_name = match field.name.as_deref() {
        _ if field.skip || field.local => None,
        Some(utils::SKIP_SENTINEL) => None,
        Some(name) => Some(name.to_string()),
        None => Some(utils::unraw(ident)),
    };
    let domain = if field.local {
        None
    } else {
        Some(field.domain.clone().unwrap_or_else(|| ident.clone()))
    };

    Ok(ResolvedField {
        ident,
        ty: &field.ty,
        schema_name,
        tag,
        domain,
    })
}

/// Generate `SchemaType` and `SchemaRecord`
fn generate_schema_impls(receiver: &RecordReceiver, fields: &[ResolvedField<'_>]) -> TokenStream2 {
    let struct_name = &receiver.ident;
    let schema_fields: Vec<_> = fields
        .iter()
        .filter_map(|field| field.schema_name.as_ref().map(|name| (field, name)))
        .collect();

    let inserts = schema_fields.iter().map(|(field, name)| {
        let ty = field.ty;
        let tag = &field.tag;
        quote! {
            fields.insert(
                ::std::string::String::from(#name),
                ::schema_bridge::schema::builder::build_field::<#ty>(
                    #name,
                    &::schema_bridge::schema::FieldTag::must_parse(#tag),
                ),
            );
        }
    });

    let nested = schema_fields.iter().map(|(field, name)| {
        let ty = field.ty;
        quote! {
            ::schema_bridge::schema::builder::customize_field::<#ty>(descriptor, #name, context);
        }
    });

    let hook = receiver.customize.as_ref().map(|hook| {
        quote! {
            ::schema_bridge::schema::builder::run_hook(descriptor, context, #hook);
        }
    });

    quote! {
        impl ::schema_bridge::schema::SchemaType for #struct_name {
            fn descriptor() -> ::schema_bridge::schema::FieldDescriptor {
                ::schema_bridge::schema::FieldDescriptor::record(
                    <Self as ::schema_bridge::schema::SchemaRecord>::record_schema(),
                )
            }

            fn customize_nested(
                descriptor: &mut ::schema_bridge::schema::FieldDescriptor,
                context: &::schema_bridge::schema::PathContext,
            ) {
                <Self as ::schema_bridge::schema::SchemaRecord>::customize_record(
                    descriptor, context,
                );
            }
        }

        impl ::schema_bridge::schema::SchemaRecord for #struct_name {
            #[allow(unused_mut)]
            fn record_schema() -> ::schema_bridge::schema::RecordSchema {
                let mut fields = ::schema_bridge::schema::RecordSchema::new();
                #(#inserts)*
                fields
            }

            #[allow(unused_variables)]
            fn customize_record(
                descriptor: &mut ::schema_bridge::schema::FieldDescriptor,
                context: &::schema_bridge::schema::PathContext,
            ) {
                #(#nested)*
                #hook
            }
        }
    }
}

/// Generate `Bridge<Domain>`
fn generate_bridge_impl(
    receiver: &RecordReceiver,
    domain: &syn::Path,
    fields: &[ResolvedField<'_>],
) -> TokenStream2 {
    let struct_name = &receiver.ident;
    let markers = if receiver.no_explicit {
        None
    } else {
        Some(
            receiver
                .explicit
                .clone()
                .unwrap_or_else(|| {
                    syn::Ident::new(utils::DEFAULT_MARKER_FIELD, struct_name.span())
                }),
        )
    };

    let converted: Vec<_> = fields
        .iter()
        .filter_map(|field| field.domain.as_ref().map(|domain_field| (field, domain_field)))
        .collect();
    let known_fields: Vec<String> = converted
        .iter()
        .map(|(_, domain_field)| utils::unraw(domain_field))
        .collect();

    let lowered = converted.iter().map(|(field, domain_field)| {
        let ident = field.ident;
        let segment = field.path_segment();
        let marker = utils::unraw(domain_field);
        let lower = quote! {
            walk.descend(#segment, |walk| {
                ::schema_bridge::convert::lower_field(&self.#ident, &mut domain.#domain_field, walk)
            })?
        };
        if markers.is_some() {
            quote! {
                if #lower {
                    explicit.push(::std::string::String::from(#marker));
                }
            }
        } else {
            quote! { #lower; }
        }
    });

    let raised = fields.iter().map(|field| {
        let ident = field.ident;
        let Some(domain_field) = field.domain.as_ref() else {
            return quote! { #ident: ::std::default::Default::default(), };
        };
        let segment = field.path_segment();
        let marker = utils::unraw(domain_field);
        let presence = match &markers {
            Some(markers) => quote! {
                ::schema_bridge::convert::Presence::of(&domain.#markers, #marker)
            },
            None => quote! { ::schema_bridge::convert::Presence::Unmarked },
        };
        quote! {
            #ident: walk.descend(#segment, |walk| {
                ::schema_bridge::convert::raise_field(&domain.#domain_field, #presence, walk)
            })?,
        }
    });

    let (collect_markers, store_markers, check_markers) = match &markers {
        Some(markers) => (
            quote! {
                let mut explicit: ::std::vec::Vec<::std::string::String> =
                    ::std::vec::Vec::new();
            },
            quote! { domain.#markers = explicit; },
            quote! { walk.check_explicit_fields(&domain.#markers, &[#(#known_fields),*])?; },
        ),
        None => (quote! {}, quote! {}, quote! {}),
    };

    quote! {
        impl ::schema_bridge::convert::Bridge<#domain> for #struct_name {
            #[allow(unused_mut)]
            fn to_domain(
                &self,
                walk: &mut ::schema_bridge::convert::Walk<'_>,
            ) -> ::schema_bridge::error::Result<::schema_bridge::convert::Lowered<#domain>> {
                walk.trace_record(::std::any::type_name::<Self>(), "to domain");
                let mut domain = <#domain as ::std::default::Default>::default();
                #collect_markers
                #(#lowered)*
                #store_markers
                ::std::result::Result::Ok(::schema_bridge::convert::Lowered::implicit(domain))
            }

            #[allow(unused_variables)]
            fn to_config(
                domain: &#domain,
                presence: ::schema_bridge::convert::Presence,
                walk: &mut ::schema_bridge::convert::Walk<'_>,
            ) -> ::schema_bridge::error::Result<Self> {
                walk.trace_record(::std::any::type_name::<Self>(), "to config");
                #check_markers
                ::std::result::Result::Ok(Self {
                    #(#raised)*
                })
            }
        }
    }
}
