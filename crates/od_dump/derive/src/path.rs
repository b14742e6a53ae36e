//! Paths into `od_dump` used by generated code.
//!
//! Keeping them here limits the changes needed when the crate layout moves.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// The access path of the `od_dump` crate.
///
/// 1. For crates that depend on `od_dump`, `::od_dump` is returned.
/// 2. For crates that depend on `od_core`, `::od_core::dump` is returned.
/// 3. Otherwise `::od_dump` is returned, which may be incorrect.
///
/// Reading the manifest is relatively expensive, so the path is resolved
/// once per derive and passed around.
pub(crate) fn od_dump() -> syn::Path {
    od_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("od_dump"))
}

// -----------------------------------------------------------------------------
// Items

#[inline(always)]
pub(crate) fn dump_(od_dump_path: &syn::Path) -> TokenStream {
    quote! { #od_dump_path::Dump }
}

#[inline(always)]
pub(crate) fn dump_ref_(od_dump_path: &syn::Path) -> TokenStream {
    quote! { #od_dump_path::DumpRef }
}

#[inline(always)]
pub(crate) fn enum_value_(od_dump_path: &syn::Path) -> TokenStream {
    quote! { #od_dump_path::EnumValue }
}

#[inline(always)]
pub(crate) fn sequence_(od_dump_path: &syn::Path) -> TokenStream {
    quote! { #od_dump_path::Sequence }
}

#[inline(always)]
pub(crate) fn mapping_(od_dump_path: &syn::Path) -> TokenStream {
    quote! { #od_dump_path::Mapping }
}

#[inline(always)]
pub(crate) fn typed_(od_dump_path: &syn::Path) -> TokenStream {
    quote! { #od_dump_path::info::Typed }
}

#[inline(always)]
pub(crate) fn type_info_(od_dump_path: &syn::Path) -> TokenStream {
    quote! { #od_dump_path::info::TypeInfo }
}

#[inline(always)]
pub(crate) fn type_ref_(od_dump_path: &syn::Path) -> TokenStream {
    quote! { #od_dump_path::info::TypeRef }
}

#[inline(always)]
pub(crate) fn base_info_(od_dump_path: &syn::Path) -> TokenStream {
    quote! { #od_dump_path::info::BaseInfo }
}

#[inline(always)]
pub(crate) fn member_info_(od_dump_path: &syn::Path) -> TokenStream {
    quote! { #od_dump_path::info::MemberInfo }
}

#[inline(always)]
pub(crate) fn method_info_(od_dump_path: &syn::Path) -> TokenStream {
    quote! { #od_dump_path::info::MethodInfo }
}

#[inline(always)]
pub(crate) fn enum_info_(od_dump_path: &syn::Path) -> TokenStream {
    quote! { #od_dump_path::info::EnumInfo }
}

#[inline(always)]
pub(crate) fn enum_variant_(od_dump_path: &syn::Path) -> TokenStream {
    quote! { #od_dump_path::info::EnumVariant }
}

#[inline(always)]
pub(crate) fn type_info_cell_(od_dump_path: &syn::Path) -> TokenStream {
    quote! { #od_dump_path::info::TypeInfoCell }
}

#[inline(always)]
pub(crate) fn generic_type_info_cell_(od_dump_path: &syn::Path) -> TokenStream {
    quote! { #od_dump_path::info::GenericTypeInfoCell }
}

#[inline(always)]
pub(crate) fn dump_policy_(od_dump_path: &syn::Path) -> TokenStream {
    quote! { #od_dump_path::policy::DumpPolicy }
}

#[inline(always)]
pub(crate) fn formatter_ref_(od_dump_path: &syn::Path) -> TokenStream {
    quote! { #od_dump_path::policy::FormatterRef }
}

#[inline(always)]
pub(crate) fn toggle_(od_dump_path: &syn::Path) -> TokenStream {
    quote! { #od_dump_path::policy::Toggle }
}

#[inline(always)]
pub(crate) fn macro_exports_(od_dump_path: &syn::Path) -> TokenStream {
    quote! { #od_dump_path::__macro_exports }
}
