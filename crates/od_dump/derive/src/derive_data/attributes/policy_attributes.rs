use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::parse::ParseStream;
use syn::{Expr, Ident, LitStr, Path, Token};

/// An explicit `Toggle` value.
#[derive(Clone, Copy)]
pub(crate) enum ToggleAttr {
    Do,
    Skip,
}

impl ToggleAttr {
    fn to_tokens(self, od_dump_path: &syn::Path) -> TokenStream {
        let toggle_ = crate::path::toggle_(od_dump_path);
        match self {
            Self::Do => quote! { #toggle_::Do },
            Self::Skip => quote! { #toggle_::Skip },
        }
    }
}

/// Keys shared by types, fields and properties, building a `DumpPolicy`.
#[derive(Default)]
pub(crate) struct PolicyAttributes {
    order: Option<Expr>,
    skip: Option<ToggleAttr>,
    dump_nulls: Option<ToggleAttr>,
    recurse: Option<ToggleAttr>,
    enumerate: Option<ToggleAttr>,
    default_member: Option<LitStr>,
    max_depth: Option<Expr>,
    max_length: Option<Expr>,
    mask: Option<Span>,
    mask_text: Option<LitStr>,
    label: Option<LitStr>,
    format: Option<LitStr>,
    display_format: Option<Span>,
    formatter: Option<LitStr>,
    formatter_type: Option<Path>,
}

fn set_once<T>(slot: &mut Option<T>, value: T, key: &Ident) -> syn::Result<()> {
    if slot.is_some() {
        return Err(syn::Error::new(key.span(), format!("duplicate `{key}`")));
    }
    *slot = Some(value);
    Ok(())
}

fn parse_value<T: syn::parse::Parse>(input: ParseStream) -> syn::Result<T> {
    input.parse::<Token![=]>()?;
    input.parse()
}

impl PolicyAttributes {
    /// Consumes `key` and its value if it is a policy key.
    ///
    /// Returns `false`, consuming nothing more, for other keys.
    pub fn parse_key(&mut self, key: &Ident, input: ParseStream) -> syn::Result<bool> {
        match key.to_string().as_str() {
            "order" => set_once(&mut self.order, parse_value(input)?, key)?,
            "skip" => set_once(&mut self.skip, ToggleAttr::Skip, key)?,
            "no_skip" => set_once(&mut self.skip, ToggleAttr::Do, key)?,
            "dump_nulls" => set_once(&mut self.dump_nulls, ToggleAttr::Do, key)?,
            "skip_nulls" => set_once(&mut self.dump_nulls, ToggleAttr::Skip, key)?,
            "recurse" => set_once(&mut self.recurse, ToggleAttr::Do, key)?,
            "no_recurse" => set_once(&mut self.recurse, ToggleAttr::Skip, key)?,
            "enumerate" => set_once(&mut self.enumerate, ToggleAttr::Do, key)?,
            "no_enumerate" => set_once(&mut self.enumerate, ToggleAttr::Skip, key)?,
            "default_member" => set_once(&mut self.default_member, parse_value(input)?, key)?,
            "max_depth" => set_once(&mut self.max_depth, parse_value(input)?, key)?,
            "max_length" => set_once(&mut self.max_length, parse_value(input)?, key)?,
            "mask" => set_once(&mut self.mask, key.span(), key)?,
            "mask_text" => set_once(&mut self.mask_text, parse_value(input)?, key)?,
            "label" => set_once(&mut self.label, parse_value(input)?, key)?,
            "format" => set_once(&mut self.format, parse_value(input)?, key)?,
            "display_format" => set_once(&mut self.display_format, key.span(), key)?,
            "formatter" => set_once(&mut self.formatter, parse_value(input)?, key)?,
            "formatter_type" => set_once(&mut self.formatter_type, parse_value(input)?, key)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    pub fn validity(&self) -> syn::Result<()> {
        if let (Some(format), Some(_)) = (&self.format, &self.display_format) {
            return Err(syn::Error::new(
                format.span(),
                "`format` and `display_format` are mutually exclusive",
            ));
        }
        if let (None, Some(target)) = (&self.formatter, &self.formatter_type) {
            return Err(syn::Error::new_spanned(
                target,
                "`formatter_type` requires `formatter = \"method\"`",
            ));
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_none()
            && self.skip.is_none()
            && self.dump_nulls.is_none()
            && self.recurse.is_none()
            && self.enumerate.is_none()
            && self.default_member.is_none()
            && self.max_depth.is_none()
            && self.max_length.is_none()
            && self.mask.is_none()
            && self.mask_text.is_none()
            && self.label.is_none()
            && self.format.is_none()
            && self.display_format.is_none()
            && self.formatter.is_none()
    }

    /// A `DumpPolicy` expression, or `None` when no key was given.
    pub fn to_tokens(&self, od_dump_path: &syn::Path) -> Option<TokenStream> {
        if self.is_empty() {
            return None;
        }
        let dump_policy_ = crate::path::dump_policy_(od_dump_path);
        let mut tokens = quote! { #dump_policy_::new() };

        if let Some(order) = &self.order {
            tokens.extend(quote! { .with_order(#order) });
        }
        let toggles = [
            (self.skip, quote! { with_skip }),
            (self.dump_nulls, quote! { with_dump_null_values }),
            (self.recurse, quote! { with_recurse_dump }),
            (self.enumerate, quote! { with_enumerate }),
        ];
        for (toggle, setter) in toggles
            .into_iter()
            .filter_map(|(toggle, setter)| Some((toggle?, setter)))
        {
            let toggle = toggle.to_tokens(od_dump_path);
            tokens.extend(quote! { .#setter(#toggle) });
        }
        if let Some(name) = &self.default_member {
            tokens.extend(quote! { .with_default_member(#name) });
        }
        if let Some(depth) = &self.max_depth {
            tokens.extend(quote! { .with_max_depth(#depth) });
        }
        if let Some(length) = &self.max_length {
            tokens.extend(quote! { .with_max_length(#length) });
        }
        if self.mask.is_some() {
            tokens.extend(quote! { .masked() });
        }
        if let Some(text) = &self.mask_text {
            tokens.extend(quote! { .with_mask_text(#text) });
        }
        if let Some(label) = &self.label {
            tokens.extend(quote! { .with_label_format(#label) });
        }
        if let Some(format) = &self.format {
            tokens.extend(quote! { .with_value_format(#format) });
        }
        if self.display_format.is_some() {
            tokens.extend(quote! { .with_value_format(#dump_policy_::DISPLAY) });
        }
        if let Some(method) = &self.formatter {
            let formatter_ref_ = crate::path::formatter_ref_(od_dump_path);
            let formatter = match &self.formatter_type {
                Some(target) => quote! { #formatter_ref_::on::<#target>(#method) },
                None => quote! { #formatter_ref_::method(#method) },
            };
            tokens.extend(quote! { .with_formatter(#formatter) });
        }
        Some(tokens)
    }
}
