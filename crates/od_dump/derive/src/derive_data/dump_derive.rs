use proc_macro2::Span;
use syn::{Data, DeriveInput, Field, Fields, Ident, Index, Member, Type};

use super::{DumpMeta, FieldAttributes, TypeAttributes};

/// A struct field with its parsed attributes.
pub(crate) struct StructField<'a> {
    pub field: &'a Field,
    pub attrs: FieldAttributes,
    /// The position of the field in the declaration.
    pub index: usize,
}

impl StructField<'_> {
    /// The member name: the field ident, or its index for tuple structs.
    pub fn name(&self) -> String {
        match &self.field.ident {
            Some(ident) => ident.to_string(),
            None => self.index.to_string(),
        }
    }

    pub fn accessor(&self) -> Member {
        match &self.field.ident {
            Some(ident) => Member::Named(ident.clone()),
            None => Member::Unnamed(Index {
                index: self.index as u32,
                span: Span::call_site(),
            }),
        }
    }

    #[inline]
    pub fn ty(&self) -> &Type {
        &self.field.ty
    }

    /// `PhantomData` fields are described but never rendered.
    pub fn is_phantom(&self) -> bool {
        match &self.field.ty {
            Type::Path(path) => path
                .path
                .segments
                .last()
                .is_some_and(|segment| segment.ident == "PhantomData"),
            _ => false,
        }
    }

    /// Whether the field contributes a readable member.
    pub fn is_readable_member(&self) -> bool {
        self.attrs.base.is_none() && self.attrs.ignore.is_none() && self.attrs.write_only.is_none()
    }
}

pub(crate) enum DumpData<'a> {
    /// Named, tuple or unit struct.
    Struct(Vec<StructField<'a>>),
    /// Fieldless enum.
    Enum(Vec<&'a Ident>),
}

pub(crate) struct DumpDerive<'a> {
    pub meta: DumpMeta<'a>,
    pub data: DumpData<'a>,
}

impl<'a> DumpDerive<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;

        let data = match &input.data {
            Data::Struct(data) => DumpData::Struct(Self::collect_fields(&data.fields)?),
            Data::Enum(data) => {
                if let Some(property) = attrs.properties.first() {
                    return Err(syn::Error::new(
                        property.name.span(),
                        "enums have no members; `property` is not supported",
                    ));
                }
                if let Some(span) = attrs.opaque.or(attrs.sequence).or(attrs.mapping) {
                    return Err(syn::Error::new(
                        span,
                        "enums do not support `opaque`, `sequence` or `mapping`",
                    ));
                }
                let mut variants = Vec::with_capacity(data.variants.len());
                for variant in &data.variants {
                    if !matches!(variant.fields, Fields::Unit) {
                        return Err(syn::Error::new_spanned(
                            &variant.fields,
                            "`Dump` can only be derived for enums without fields",
                        ));
                    }
                    variants.push(&variant.ident);
                }
                DumpData::Enum(variants)
            }
            Data::Union(data) => {
                return Err(syn::Error::new(
                    data.union_token.span,
                    "`Dump` cannot be derived for unions",
                ));
            }
        };

        let meta = DumpMeta::new(attrs, &input.ident, &input.generics)?;
        Ok(Self { meta, data })
    }

    fn collect_fields(fields: &'a Fields) -> syn::Result<Vec<StructField<'a>>> {
        let mut collected = Vec::with_capacity(fields.len());
        let mut base: Option<Span> = None;

        for (index, field) in fields.iter().enumerate() {
            let attrs = FieldAttributes::parse_attrs(&field.attrs)?;
            if let Some(span) = attrs.base {
                if base.is_some() {
                    return Err(syn::Error::new(span, "a type has at most one `base` field"));
                }
                base = Some(span);
            }
            collected.push(StructField {
                field,
                attrs,
                index,
            });
        }
        Ok(collected)
    }
}
