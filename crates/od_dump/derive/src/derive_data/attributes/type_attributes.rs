use proc_macro2::Span;
use syn::parse::ParseStream;
use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, Ident, LitStr, Token, Type, parenthesized};

use super::{PolicyAttributes, parse_dump_attrs, parse_keys, unknown_key};

/// How a property getter reports failures.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum PropertyAccess {
    /// `fn(&Self) -> V`
    Plain,
    /// `fn(&Self) -> Result<V, impl Display>`
    Fallible,
    /// `fn(&Self) -> Result<V, ReadError>`
    Guarded,
}

/// Format: `property(name = "a", get = path, fallible, overridable, ...policy)`
pub(crate) struct PropertyAttribute {
    pub name: LitStr,
    pub get: Expr,
    pub access: PropertyAccess,
    pub overridable: bool,
    pub policy: PolicyAttributes,
}

impl PropertyAttribute {
    fn parse(span: Span, input: ParseStream) -> syn::Result<Self> {
        let content;
        parenthesized!(content in input);

        let mut name = None;
        let mut get = None;
        let mut access = PropertyAccess::Plain;
        let mut overridable = false;
        let mut policy = PolicyAttributes::default();

        parse_keys(&content, |key: &Ident, input: ParseStream| {
            if policy.parse_key(key, input)? {
                return Ok(());
            }
            match key.to_string().as_str() {
                "name" => {
                    input.parse::<Token![=]>()?;
                    name = Some(input.parse::<LitStr>()?);
                }
                "get" => {
                    input.parse::<Token![=]>()?;
                    get = Some(input.parse::<Expr>()?);
                }
                "fallible" | "guarded" if access != PropertyAccess::Plain => {
                    return Err(syn::Error::new(
                        key.span(),
                        "`fallible` and `guarded` are mutually exclusive",
                    ));
                }
                "fallible" => access = PropertyAccess::Fallible,
                "guarded" => access = PropertyAccess::Guarded,
                "overridable" => overridable = true,
                _ => return Err(unknown_key(key, "property")),
            }
            Ok(())
        })?;
        policy.validity()?;

        let Some(name) = name else {
            return Err(syn::Error::new(span, "property requires `name = \"...\"`"));
        };
        let Some(get) = get else {
            return Err(syn::Error::new(span, "property requires `get = path`"));
        };
        Ok(Self {
            name,
            get,
            access,
            overridable,
            policy,
        })
    }
}

/// The parameter of a static method: a concrete type or any value.
pub(crate) enum StaticParam {
    Exact(Type),
    Any,
}

/// The `#[dump(...)]` attributes of a type.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    pub policy: PolicyAttributes,
    pub opaque: Option<Span>,
    pub display: Option<Span>,
    pub sequence: Option<Span>,
    pub mapping: Option<Span>,
    pub shadow: Option<Type>,
    pub methods: Vec<Ident>,
    pub static_methods: Vec<(Ident, StaticParam)>,
    pub properties: Vec<PropertyAttribute>,
}

/// Format: `name: Type` or `name: dyn`
fn parse_static_method(input: ParseStream) -> syn::Result<(Ident, StaticParam)> {
    let name: Ident = input.parse()?;
    input.parse::<Token![:]>()?;
    if input.peek(Token![dyn]) {
        let fork = input.fork();
        fork.parse::<Token![dyn]>()?;
        if fork.is_empty() || fork.peek(Token![,]) {
            input.parse::<Token![dyn]>()?;
            return Ok((name, StaticParam::Any));
        }
    }
    match input.parse()? {
        Type::TraitObject(_) => Ok((name, StaticParam::Any)),
        ty => Ok((name, StaticParam::Exact(ty))),
    }
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        parse_dump_attrs(attrs, |key, input| {
            if this.policy.parse_key(key, input)? {
                return Ok(());
            }
            match key.to_string().as_str() {
                "methods" => {
                    let content;
                    parenthesized!(content in input);
                    let names = Punctuated::<Ident, Token![,]>::parse_terminated(&content)?;
                    this.methods.extend(names);
                }
                "static_methods" => {
                    let content;
                    parenthesized!(content in input);
                    let methods = Punctuated::<_, Token![,]>::parse_terminated_with(
                        &content,
                        parse_static_method,
                    )?;
                    this.static_methods.extend(methods);
                }
                "property" => {
                    let property = PropertyAttribute::parse(key.span(), input)?;
                    this.properties.push(property);
                }
                "shadow" => {
                    if this.shadow.is_some() {
                        return Err(syn::Error::new(key.span(), "duplicate `shadow`"));
                    }
                    input.parse::<Token![=]>()?;
                    this.shadow = Some(input.parse()?);
                }
                flag => {
                    let slot = match flag {
                        "opaque" => &mut this.opaque,
                        "display" => &mut this.display,
                        "sequence" => &mut this.sequence,
                        "mapping" => &mut this.mapping,
                        _ => return Err(unknown_key(key, "type")),
                    };
                    if slot.is_some() {
                        return Err(syn::Error::new(key.span(), format!("duplicate `{key}`")));
                    }
                    *slot = Some(key.span());
                }
            }
            Ok(())
        })?;
        this.policy.validity()?;
        Ok(this)
    }
}
