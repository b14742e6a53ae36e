//! Code generation for `#[derive(Dump)]`.

// -----------------------------------------------------------------------------
// Modules

mod enum_kind;
mod struct_kind;
mod trait_dump;
mod trait_typed;

// -----------------------------------------------------------------------------
// Internal API

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::Type;

use crate::derive_data::{DumpData, DumpDerive, DumpMeta};

/// The split generics of the derived type, shared by both impls.
pub(super) struct SplitGenerics {
    impl_generics: TokenStream,
    ty_generics: TokenStream,
    where_clause: TokenStream,
}

impl SplitGenerics {
    fn new<'t>(meta: &DumpMeta, bounds: impl IntoIterator<Item = (&'t Type, TokenStream)>) -> Self {
        let (impl_generics, ty_generics, where_clause) = meta.split_generics(bounds);
        Self {
            impl_generics: impl_generics.to_token_stream(),
            ty_generics: ty_generics.to_token_stream(),
            where_clause: where_clause.to_token_stream(),
        }
    }
}

pub(crate) fn impl_dump(derive: &DumpDerive) -> TokenStream {
    let impls = match &derive.data {
        DumpData::Struct(fields) => struct_kind::impl_struct(&derive.meta, fields),
        DumpData::Enum(variants) => enum_kind::impl_enum(&derive.meta, variants),
    };

    quote! {
        const _: () = {
            #impls
        };
    }
}
