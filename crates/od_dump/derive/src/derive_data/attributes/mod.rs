//! Parsing of `#[dump(...)]` attributes.

// -----------------------------------------------------------------------------
// Modules

mod field_attributes;
mod policy_attributes;
mod type_attributes;

// -----------------------------------------------------------------------------
// Internal API

use syn::parse::ParseStream;
use syn::{Attribute, Ident, Token};

pub(crate) use field_attributes::FieldAttributes;
pub(crate) use policy_attributes::PolicyAttributes;
pub(crate) use type_attributes::{PropertyAccess, PropertyAttribute, StaticParam, TypeAttributes};

/// Calls `parse_key` for every `#[dump(...)]` attribute in `attrs`.
fn parse_dump_attrs(
    attrs: &[Attribute],
    mut parse_key: impl FnMut(&Ident, ParseStream) -> syn::Result<()>,
) -> syn::Result<()> {
    for attr in attrs {
        if attr.path().is_ident(crate::DUMP_ATTRIBUTE_NAME) {
            attr.parse_args_with(|input: ParseStream| parse_keys(input, &mut parse_key))?;
        }
    }
    Ok(())
}

/// Format: `key, key = value, key(...)`
fn parse_keys(
    input: ParseStream,
    mut parse_key: impl FnMut(&Ident, ParseStream) -> syn::Result<()>,
) -> syn::Result<()> {
    while !input.is_empty() {
        let key: Ident = input.parse()?;
        parse_key(&key, input)?;
        if input.is_empty() {
            break;
        }
        input.parse::<Token![,]>()?;
    }
    Ok(())
}

fn unknown_key(key: &Ident, place: &str) -> syn::Error {
    syn::Error::new(key.span(), format!("unknown {place} attribute `{key}`"))
}
