use proc_macro2::TokenStream;
use quote::quote;

use super::SplitGenerics;
use super::trait_dump::impl_trait_dump;
use super::trait_typed::impl_trait_typed;
use crate::derive_data::{DumpMeta, PropertyAccess, PropertyAttribute, StructField};

fn field_member_tokens(meta: &DumpMeta, field: &StructField) -> TokenStream {
    let od_dump_path = meta.od_dump_path();
    let member_info_ = crate::path::member_info_(od_dump_path);
    let name = field.name();
    let ty = field.ty();
    let attrs = &field.attrs;

    let mut tokens = if attrs.write_only.is_some() {
        quote! { #member_info_::write_only::<#ty>(#name) }
    } else {
        let accessor = field.accessor();
        quote! { #member_info_::field::<Self, #ty>(#name, |this| &this.#accessor) }
    };

    if attrs.overridable.is_some() {
        tokens.extend(quote! { .overridable() });
    }
    if attrs.indexed.is_some() {
        tokens.extend(quote! { .indexed() });
    }
    if attrs.synthesized.is_some() || field.is_phantom() {
        tokens.extend(quote! { .synthesized() });
    }
    if let Some(policy) = attrs.policy.to_tokens(od_dump_path) {
        tokens.extend(quote! { .with_policy(#policy) });
    }
    tokens
}

fn property_member_tokens(meta: &DumpMeta, property: &PropertyAttribute) -> TokenStream {
    let od_dump_path = meta.od_dump_path();
    let member_info_ = crate::path::member_info_(od_dump_path);
    let PropertyAttribute { name, get, .. } = property;

    let mut tokens = match property.access {
        PropertyAccess::Plain => quote! { #member_info_::property::<Self, _>(#name, #get) },
        PropertyAccess::Fallible => quote! { #member_info_::fallible::<Self, _, _>(#name, #get) },
        PropertyAccess::Guarded => quote! { #member_info_::guarded::<Self, _>(#name, #get) },
    };
    if property.overridable {
        tokens.extend(quote! { .overridable() });
    }
    if let Some(policy) = property.policy.to_tokens(od_dump_path) {
        tokens.extend(quote! { .with_policy(#policy) });
    }
    tokens
}

/// Implements `Typed` and `Dump` for a named, tuple or unit struct.
///
/// Opaque structs keep their methods and policy but describe no members.
pub(super) fn impl_struct(meta: &DumpMeta, fields: &[StructField]) -> TokenStream {
    let od_dump_path = meta.od_dump_path();
    let type_info_ = crate::path::type_info_(od_dump_path);
    let dump_ref_ = crate::path::dump_ref_(od_dump_path);
    let dump_ = crate::path::dump_(od_dump_path);
    let typed_ = crate::path::typed_(od_dump_path);
    let opaque = meta.attrs().opaque.is_some();

    let mut type_info_tokens = if opaque {
        quote! { #type_info_::opaque::<Self>() }
    } else {
        quote! { #type_info_::composite::<Self>() }
    };
    let mut bounds = meta.attribute_bounds();

    if !opaque {
        let members: Vec<TokenStream> = fields
            .iter()
            .filter(|field| field.attrs.base.is_none() && field.attrs.ignore.is_none())
            .map(|field| field_member_tokens(meta, field))
            .chain(
                meta.attrs()
                    .properties
                    .iter()
                    .map(|property| property_member_tokens(meta, property)),
            )
            .collect();
        if !members.is_empty() {
            type_info_tokens.extend(quote! { .with_members([#(#members),*]) });
        }

        if let Some(base) = fields.iter().find(|field| field.attrs.base.is_some()) {
            let base_info_ = crate::path::base_info_(od_dump_path);
            let ty = base.ty();
            let accessor = base.accessor();
            type_info_tokens.extend(quote! {
                .with_base(#base_info_::new::<Self, #ty>(|this| &this.#accessor))
            });
            bounds.push((ty, quote! { #dump_ + #typed_ }));
        }

        bounds.extend(
            fields
                .iter()
                .filter(|field| field.is_readable_member())
                .map(|field| (field.ty(), quote! { #dump_ })),
        );
    }
    type_info_tokens.extend(meta.common_info_tokens());

    let dump_ref_tokens = if opaque {
        quote! { #dump_ref_::Opaque }
    } else {
        quote! { #dump_ref_::Composite }
    };

    let generics = SplitGenerics::new(meta, bounds);
    let typed_impl = impl_trait_typed(meta, type_info_tokens, &generics);
    let dump_impl = impl_trait_dump(meta, dump_ref_tokens, &generics);

    quote! {
        #typed_impl

        #dump_impl
    }
}
