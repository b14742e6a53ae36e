use proc_macro2::Span;
use syn::Attribute;

use super::{PolicyAttributes, parse_dump_attrs, unknown_key};

/// The `#[dump(...)]` attributes of a struct field.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    pub policy: PolicyAttributes,
    pub base: Option<Span>,
    pub ignore: Option<Span>,
    pub overridable: Option<Span>,
    pub synthesized: Option<Span>,
    pub write_only: Option<Span>,
    pub indexed: Option<Span>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        parse_dump_attrs(attrs, |key, input| {
            if this.policy.parse_key(key, input)? {
                return Ok(());
            }
            let slot = match key.to_string().as_str() {
                "base" => &mut this.base,
                "ignore" => &mut this.ignore,
                "overridable" => &mut this.overridable,
                "synthesized" => &mut this.synthesized,
                "write_only" => &mut this.write_only,
                "indexed" => &mut this.indexed,
                _ => return Err(unknown_key(key, "field")),
            };
            if slot.is_some() {
                return Err(syn::Error::new(key.span(), format!("duplicate `{key}`")));
            }
            *slot = Some(key.span());
            Ok(())
        })?;
        this.validity()?;
        Ok(this)
    }

    fn validity(&self) -> syn::Result<()> {
        self.policy.validity()?;
        let describes_member = !self.policy.is_empty()
            || self.overridable.is_some()
            || self.synthesized.is_some()
            || self.write_only.is_some()
            || self.indexed.is_some();

        if let Some(span) = self.base.or(self.ignore)
            && describes_member
        {
            return Err(syn::Error::new(
                span,
                "`base` and `ignore` fields are not members and take no other keys",
            ));
        }
        if let (Some(_), Some(span)) = (self.base, self.ignore) {
            return Err(syn::Error::new(span, "`base` and `ignore` are mutually exclusive"));
        }
        Ok(())
    }
}
