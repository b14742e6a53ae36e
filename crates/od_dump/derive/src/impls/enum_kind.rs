use proc_macro2::TokenStream;
use quote::quote;
use syn::Ident;

use super::SplitGenerics;
use super::trait_dump::impl_trait_dump;
use super::trait_typed::impl_trait_typed;
use crate::derive_data::DumpMeta;

/// Implements `Typed` and `Dump` for a fieldless enum.
///
/// Variant values are the enum's discriminants cast to `u64`.
pub(super) fn impl_enum(meta: &DumpMeta, variants: &[&Ident]) -> TokenStream {
    let od_dump_path = meta.od_dump_path();
    let type_info_ = crate::path::type_info_(od_dump_path);
    let typed_ = crate::path::typed_(od_dump_path);
    let enum_info_ = crate::path::enum_info_(od_dump_path);
    let enum_variant_ = crate::path::enum_variant_(od_dump_path);
    let enum_value_ = crate::path::enum_value_(od_dump_path);
    let dump_ref_ = crate::path::dump_ref_(od_dump_path);

    let names = variants.iter().map(|ident| ident.to_string());
    let mut type_info_tokens = quote! {
        #type_info_::enumeration::<Self>(#enum_info_::discrete([
            #(#enum_variant_::new(#names, Self::#variants as u64)),*
        ]))
    };
    type_info_tokens.extend(meta.common_info_tokens());

    let bits = if variants.is_empty() {
        quote! { match *self {} }
    } else {
        quote! {
            match self {
                #(Self::#variants => Self::#variants as u64,)*
            }
        }
    };
    let dump_ref_tokens = quote! {
        #dump_ref_::Enum(#enum_value_::new(<Self as #typed_>::type_info(), #bits))
    };

    let generics = SplitGenerics::new(meta, meta.attribute_bounds());
    let typed_impl = impl_trait_typed(meta, type_info_tokens, &generics);
    let dump_impl = impl_trait_dump(meta, dump_ref_tokens, &generics);

    quote! {
        #typed_impl

        #dump_impl
    }
}
