use proc_macro2::TokenStream;
use quote::quote;

use super::SplitGenerics;
use crate::derive_data::DumpMeta;

/// Generate implementation code for `Dump`.
///
/// `dump_ref_tokens` is the body of `dump_ref`.
pub(super) fn impl_trait_dump(
    meta: &DumpMeta,
    dump_ref_tokens: TokenStream,
    generics: &SplitGenerics,
) -> TokenStream {
    let od_dump_path = meta.od_dump_path();
    let dump_ = crate::path::dump_(od_dump_path);
    let dump_ref_ = crate::path::dump_ref_(od_dump_path);
    let typed_ = crate::path::typed_(od_dump_path);
    let type_info_ = crate::path::type_info_(od_dump_path);

    let as_sequence = meta.attrs().sequence.map(|_| {
        let sequence_ = crate::path::sequence_(od_dump_path);
        quote! {
            #[inline]
            fn as_sequence(&self) -> ::core::option::Option<&dyn #sequence_> {
                ::core::option::Option::Some(self)
            }
        }
    });
    let as_mapping = meta.attrs().mapping.map(|_| {
        let mapping_ = crate::path::mapping_(od_dump_path);
        quote! {
            #[inline]
            fn as_mapping(&self) -> ::core::option::Option<&dyn #mapping_> {
                ::core::option::Option::Some(self)
            }
        }
    });

    let ident = meta.ident();
    let SplitGenerics {
        impl_generics,
        ty_generics,
        where_clause,
    } = generics;

    quote! {
        impl #impl_generics #dump_ for #ident #ty_generics #where_clause {
            #[inline]
            fn dump_type_info(&self) -> &'static #type_info_ {
                <Self as #typed_>::type_info()
            }

            fn dump_ref(&self) -> #dump_ref_<'_> {
                #dump_ref_tokens
            }

            #[inline]
            fn as_dump(&self) -> &dyn #dump_ {
                self
            }

            #as_sequence

            #as_mapping
        }
    }
}
