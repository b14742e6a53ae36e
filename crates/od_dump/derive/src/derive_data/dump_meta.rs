use proc_macro2::{TokenStream, TokenTree};
use quote::{ToTokens, quote};
use syn::{GenericParam, Generics, Ident, ImplGenerics, Type, TypeGenerics, WhereClause};

use super::TypeAttributes;

/// Type-level data shared by every generated impl.
pub(crate) struct DumpMeta<'a> {
    attrs: TypeAttributes,
    ident: &'a Ident,
    generics: &'a Generics,
    od_dump_path: syn::Path,
}

fn mentions(tokens: TokenStream, params: &[&Ident]) -> bool {
    tokens.into_iter().any(|token| match token {
        TokenTree::Ident(ident) => params.contains(&&ident),
        TokenTree::Group(group) => mentions(group.stream(), params),
        _ => false,
    })
}

impl<'a> DumpMeta<'a> {
    pub fn new(attrs: TypeAttributes, ident: &'a Ident, generics: &'a Generics) -> syn::Result<Self> {
        if let Some(lifetime) = generics.lifetimes().next() {
            return Err(syn::Error::new_spanned(
                lifetime,
                "`Dump` types must be `'static`; lifetime parameters are not supported",
            ));
        }
        Ok(Self {
            attrs,
            ident,
            generics,
            od_dump_path: crate::path::od_dump(),
        })
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn ident(&self) -> &Ident {
        self.ident
    }

    #[inline]
    pub fn od_dump_path(&self) -> &syn::Path {
        &self.od_dump_path
    }

    /// Whether the `TypeInfo` must be stored per instantiation.
    pub fn impl_with_generic(&self) -> bool {
        !self.generics.params.is_empty()
    }

    fn type_params(&self) -> Vec<&Ident> {
        self.generics
            .params
            .iter()
            .filter_map(|param| match param {
                GenericParam::Type(param) => Some(&param.ident),
                _ => None,
            })
            .collect()
    }

    /// Splits the generics, bounding every type parameter by `'static` and
    /// every entry of `bounds` whose type mentions a type parameter.
    ///
    /// Bounds on concrete types are left to the generated code so recursive
    /// types do not create cyclic where clauses.
    pub fn split_generics<'t>(
        &self,
        bounds: impl IntoIterator<Item = (&'t Type, TokenStream)>,
    ) -> (ImplGenerics<'_>, TypeGenerics<'_>, Option<WhereClause>) {
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();
        let params = self.type_params();
        if params.is_empty() {
            return (impl_generics, ty_generics, where_clause.cloned());
        }

        let mut where_clause = where_clause.cloned().unwrap_or_else(|| WhereClause {
            where_token: Default::default(),
            predicates: Default::default(),
        });
        for param in &params {
            where_clause.predicates.push(syn::parse_quote! { #param: 'static });
        }
        for (ty, bound) in bounds {
            if mentions(ty.to_token_stream(), &params) {
                where_clause.predicates.push(syn::parse_quote! { #ty: #bound });
            }
        }
        (impl_generics, ty_generics, Some(where_clause))
    }

    /// `Self` rendered through `Display`, for `#[dump(display)]`.
    pub fn display_tokens(&self) -> Option<TokenStream> {
        self.attrs.display?;
        let macro_exports_ = crate::path::macro_exports_(&self.od_dump_path);
        Some(quote! { .with_display(#macro_exports_::display::<Self>) })
    }

    /// Builder calls shared by every kind: methods, policy, shadow and display.
    pub fn common_info_tokens(&self) -> TokenStream {
        let od_dump_path = &self.od_dump_path;
        let method_info_ = crate::path::method_info_(od_dump_path);
        let mut tokens = TokenStream::new();

        let instance = self.attrs.methods.iter().map(|ident| {
            let name = ident.to_string();
            quote! { #method_info_::instance::<Self, _>(#name, Self::#ident) }
        });
        let statics = self.attrs.static_methods.iter().map(|(ident, param)| {
            let name = ident.to_string();
            match param {
                super::StaticParam::Exact(ty) => {
                    quote! { #method_info_::with_param::<#ty, _>(#name, Self::#ident) }
                }
                super::StaticParam::Any => quote! { #method_info_::with_any(#name, Self::#ident) },
            }
        });
        let methods: Vec<TokenStream> = instance.chain(statics).collect();
        if !methods.is_empty() {
            tokens.extend(quote! { .with_methods([#(#methods),*]) });
        }

        if let Some(policy) = self.attrs.policy.to_tokens(od_dump_path) {
            tokens.extend(quote! { .with_policy(#policy) });
        }
        if let Some(shadow) = &self.attrs.shadow {
            let type_ref_ = crate::path::type_ref_(od_dump_path);
            tokens.extend(quote! { .with_shadow(#type_ref_::of::<#shadow>()) });
        }
        tokens.extend(self.display_tokens());
        tokens
    }

    /// Bounds required by the type-level attributes.
    pub fn attribute_bounds(&self) -> Vec<(&Type, TokenStream)> {
        let od_dump_path = &self.od_dump_path;
        let dump_ = crate::path::dump_(od_dump_path);
        let typed_ = crate::path::typed_(od_dump_path);

        let mut bounds = Vec::new();
        for (_, param) in &self.attrs.static_methods {
            if let super::StaticParam::Exact(ty) = param {
                bounds.push((ty, quote! { #dump_ + #typed_ }));
            }
        }
        if let Some(shadow) = &self.attrs.shadow {
            bounds.push((shadow, quote! { #typed_ }));
        }
        bounds
    }
}
