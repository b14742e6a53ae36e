use proc_macro2::TokenStream;
use quote::quote;

use super::SplitGenerics;
use crate::derive_data::DumpMeta;

/// Generate implementation code for `Typed`.
///
/// `type_info_tokens` builds the `TypeInfo`; it runs once per concrete type.
pub(super) fn impl_trait_typed(
    meta: &DumpMeta,
    type_info_tokens: TokenStream,
    generics: &SplitGenerics,
) -> TokenStream {
    let od_dump_path = meta.od_dump_path();
    let typed_ = crate::path::typed_(od_dump_path);
    let type_info_ = crate::path::type_info_(od_dump_path);

    let inner_cell_tokens = if meta.impl_with_generic() {
        let info_cell = crate::path::generic_type_info_cell_(od_dump_path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_insert::<Self>(|| {
                #type_info_tokens
            })
        }
    } else {
        let info_cell = crate::path::type_info_cell_(od_dump_path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_init(|| {
                #type_info_tokens
            })
        }
    };

    let ident = meta.ident();
    let SplitGenerics {
        impl_generics,
        ty_generics,
        where_clause,
    } = generics;

    quote! {
        impl #impl_generics #typed_ for #ident #ty_generics #where_clause {
            fn type_info() -> &'static #type_info_ {
                #inner_cell_tokens
            }
        }
    }
}
